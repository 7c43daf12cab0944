use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ServiceError;
use models::toy;

/// All toy fields are editable, at creation and afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ToyInput {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

pub async fn create_toy(db: &DatabaseConnection, input: &ToyInput) -> Result<toy::Model, ServiceError> {
    Ok(toy::create(db, &input.name, &input.color).await?)
}

pub async fn get_toy(db: &DatabaseConnection, id: Uuid) -> Result<toy::Model, ServiceError> {
    toy::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("toy"))
}

pub async fn list_toys(db: &DatabaseConnection) -> Result<Vec<toy::Model>, ServiceError> {
    toy::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_toy(
    db: &DatabaseConnection,
    id: Uuid,
    input: &ToyInput,
) -> Result<toy::Model, ServiceError> {
    toy::validate_name(&input.name)?;
    let mut am: toy::ActiveModel = get_toy(db, id).await?.into();
    am.name = Set(input.name.clone());
    am.color = Set(input.color.clone());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn delete_toy(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let found = get_toy(db, id).await?;
    toy::Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
