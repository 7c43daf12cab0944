use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::{cat, feeding, photo, toy};

/// Editable fields at creation time. The owner is never part of the input;
/// it always comes from the authenticated requester.
#[derive(Debug, Clone, Deserialize)]
pub struct CatInput {
    pub name: String,
    pub breed: String,
    #[serde(default)]
    pub description: String,
    pub age: i32,
}

/// Fields editable after creation. Name is deliberately absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CatUpdate {
    pub breed: String,
    #[serde(default)]
    pub description: String,
    pub age: i32,
}

/// Everything the detail view renders: the cat, its feeding log, its toy
/// set, the toys still available to add, and its photos.
#[derive(Debug, Serialize)]
pub struct CatDetail {
    pub cat: cat::Model,
    pub feedings: Vec<feeding::Model>,
    pub toys: Vec<toy::Model>,
    pub available_toys: Vec<toy::Model>,
    pub photos: Vec<photo::Model>,
}

pub async fn create_cat(
    db: &DatabaseConnection,
    owner_id: Uuid,
    input: &CatInput,
) -> Result<cat::Model, ServiceError> {
    let created = cat::create(db, owner_id, &input.name, &input.breed, &input.description, input.age).await?;
    Ok(created)
}

pub async fn get_cat(db: &DatabaseConnection, id: Uuid) -> Result<cat::Model, ServiceError> {
    cat::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("cat"))
}

/// The cat, but only if the requester owns it. Missing and foreign cats
/// are indistinguishable to the caller.
pub async fn get_owned_cat(
    db: &DatabaseConnection,
    id: Uuid,
    owner_id: Uuid,
) -> Result<cat::Model, ServiceError> {
    let found = get_cat(db, id).await?;
    if found.user_id != owner_id {
        return Err(ServiceError::not_found("cat"));
    }
    Ok(found)
}

pub async fn list_cats_for_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<cat::Model>, ServiceError> {
    Ok(cat::for_owner(db, owner_id).await?)
}

/// Update breed/description/age. Name and owner stay fixed.
pub async fn update_cat(
    db: &DatabaseConnection,
    id: Uuid,
    owner_id: Uuid,
    update: &CatUpdate,
) -> Result<cat::Model, ServiceError> {
    cat::validate_breed(&update.breed)?;
    cat::validate_age(update.age)?;
    let mut am: cat::ActiveModel = get_owned_cat(db, id, owner_id).await?.into();
    am.breed = Set(update.breed.clone());
    am.description = Set(update.description.clone());
    am.age = Set(update.age);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Remove the cat; the schema cascades feedings, photos, and toy links.
pub async fn delete_cat(db: &DatabaseConnection, id: Uuid, owner_id: Uuid) -> Result<(), ServiceError> {
    let found = get_owned_cat(db, id, owner_id).await?;
    cat::Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Aggregate for the detail view. Deliberately not owner-scoped: any
/// authenticated user may view any cat's profile.
pub async fn cat_detail(db: &DatabaseConnection, id: Uuid) -> Result<CatDetail, ServiceError> {
    let found = get_cat(db, id).await?;
    let feedings = feeding::for_cat(db, id).await?;
    let toys = toy::for_cat(db, id).await?;
    let available_toys = toy::not_for_cat(db, id).await?;
    let photos = photo::for_cat(db, id).await?;
    Ok(CatDetail { cat: found, feedings, toys, available_toys, photos })
}
