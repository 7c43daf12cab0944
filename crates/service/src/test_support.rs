#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect().await?;
    MIGRATED
        .get_or_init(|| async {
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("migrations notice: {}", e);
            }
        })
        .await;
    Ok(db)
}
