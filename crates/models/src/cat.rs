use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Age accepted at create/update time. Anything outside this range is a
/// typo, not a cat.
pub const MAX_AGE: i32 = 40;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cat")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Feeding,
    Photo,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UserId)
                .to(super::user::Column::Id)
                .into(),
            Relation::Feeding => Entity::has_many(super::feeding::Entity).into(),
            Relation::Photo => Entity::has_many(super::photo::Entity).into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_breed(breed: &str) -> Result<(), errors::ModelError> {
    if breed.trim().is_empty() {
        return Err(errors::ModelError::Validation("breed required".into()));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), errors::ModelError> {
    if !(0..=MAX_AGE).contains(&age) {
        return Err(errors::ModelError::Validation(format!("age must be in 0..={}", MAX_AGE)));
    }
    Ok(())
}

/// Insert a cat bound to its owner. The owner is fixed for the row's
/// lifetime; no update path touches `user_id`.
pub async fn create(
    db: &DatabaseConnection,
    owner_id: Uuid,
    name: &str,
    breed: &str,
    description: &str,
    age: i32,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_breed(breed)?;
    validate_age(age)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        breed: Set(breed.to_string()),
        description: Set(description.to_string()),
        age: Set(age),
        user_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Cats owned by one user, newest first.
pub async fn for_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<Model>, errors::ModelError> {
    use sea_orm::QueryOrder;
    Entity::find()
        .filter(Column::UserId.eq(owner_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
