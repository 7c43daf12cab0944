use sea_orm::DatabaseConnection;
use tracing::debug;
use uuid::Uuid;

use crate::cat_service;
use crate::errors::ServiceError;
use models::cat_toy;

/// Add a toy to the cat's set. Idempotent: re-adding an existing pair
/// changes nothing. A missing cat id is a NotFound, not a crash.
pub async fn associate(db: &DatabaseConnection, cat_id: Uuid, toy_id: Uuid) -> Result<(), ServiceError> {
    cat_service::get_cat(db, cat_id).await?;
    cat_toy::link(db, cat_id, toy_id).await?;
    debug!(%cat_id, %toy_id, "toy associated");
    Ok(())
}

/// Remove a toy from the cat's set. Removing an absent pair is a no-op.
pub async fn dissociate(db: &DatabaseConnection, cat_id: Uuid, toy_id: Uuid) -> Result<(), ServiceError> {
    cat_service::get_cat(db, cat_id).await?;
    cat_toy::unlink(db, cat_id, toy_id).await?;
    debug!(%cat_id, %toy_id, "toy dissociated");
    Ok(())
}
