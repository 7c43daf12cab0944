use crate::db::connect;
use crate::{cat, cat_toy, feeding, photo, toy, user};
use anyhow::Result;
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}

#[tokio::test]
async fn test_user_and_cat_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = match setup_test_db().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(());
        }
    };

    let owner = user::create(&db, &unique_name("alice"), "not-a-real-hash").await?;

    let created = cat::create(&db, owner.id, "Tom", "tabby", "orange menace", 3).await?;
    assert_eq!(created.user_id, owner.id);
    assert_eq!(created.name, "Tom");

    let found = cat::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|c| c.id), Some(created.id));

    // Listing is owner-scoped: a second user sees nothing.
    let stranger = user::create(&db, &unique_name("bob"), "not-a-real-hash").await?;
    let mine = cat::for_owner(&db, owner.id).await?;
    assert!(mine.iter().any(|c| c.id == created.id));
    let theirs = cat::for_owner(&db, stranger.id).await?;
    assert!(theirs.iter().all(|c| c.id != created.id));

    user::Entity::delete_by_id(stranger.id).exec(&db).await?;
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_cat_validation() -> Result<()> {
    assert!(cat::validate_name("").is_err());
    assert!(cat::validate_breed("  ").is_err());
    assert!(cat::validate_age(-1).is_err());
    assert!(cat::validate_age(41).is_err());
    assert!(cat::validate_age(0).is_ok());
    Ok(())
}

#[tokio::test]
async fn test_toy_association_idempotence() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = match setup_test_db().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(());
        }
    };

    let owner = user::create(&db, &unique_name("carol"), "not-a-real-hash").await?;
    let cat = cat::create(&db, owner.id, "Mia", "siamese", "", 2).await?;
    let yarn = toy::create(&db, "Yarn", "red").await?;

    // Adding twice yields the same set as adding once.
    cat_toy::link(&db, cat.id, yarn.id).await?;
    cat_toy::link(&db, cat.id, yarn.id).await?;
    let toys = toy::for_cat(&db, cat.id).await?;
    assert_eq!(toys.iter().filter(|t| t.id == yarn.id).count(), 1);

    // Available list excludes what the cat already has.
    let available = toy::not_for_cat(&db, cat.id).await?;
    assert!(available.iter().all(|t| t.id != yarn.id));

    // Removing twice is as quiet as removing once.
    cat_toy::unlink(&db, cat.id, yarn.id).await?;
    cat_toy::unlink(&db, cat.id, yarn.id).await?;
    let toys = toy::for_cat(&db, cat.id).await?;
    assert!(toys.iter().all(|t| t.id != yarn.id));

    toy::Entity::delete_by_id(yarn.id).exec(&db).await?;
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_cat_delete_cascades() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = match setup_test_db().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(());
        }
    };

    let owner = user::create(&db, &unique_name("dave"), "not-a-real-hash").await?;
    let cat = cat::create(&db, owner.id, "Max", "bengal", "", 5).await?;
    let ball = toy::create(&db, "Ball", "blue").await?;
    cat_toy::link(&db, cat.id, ball.id).await?;
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let fed = feeding::create(&db, cat.id, date, feeding::Meal::Dinner).await?;
    let url = format!("https://example.com/bucket/{}.jpg", Uuid::new_v4());
    let pic = photo::create(&db, cat.id, &url).await?;

    cat::Entity::delete_by_id(cat.id).exec(&db).await?;

    // Feedings and photos follow the cat; the shared toy survives.
    assert!(feeding::Entity::find_by_id(fed.id).one(&db).await?.is_none());
    assert!(photo::Entity::find_by_id(pic.id).one(&db).await?.is_none());
    assert!(toy::Entity::find_by_id(ball.id).one(&db).await?.is_some());

    toy::Entity::delete_by_id(ball.id).exec(&db).await?;
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}
