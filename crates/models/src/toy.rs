use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cat_toy;
use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "toy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CatToy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CatToy => Entity::has_many(super::cat_toy::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    color: &str,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        color: Set(color.to_string()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

async fn ids_for_cat(db: &DatabaseConnection, cat_id: Uuid) -> Result<Vec<Uuid>, errors::ModelError> {
    let links = cat_toy::Entity::find()
        .filter(cat_toy::Column::CatId.eq(cat_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(links.into_iter().map(|l| l.toy_id).collect())
}

/// Toys currently in the cat's set.
pub async fn for_cat(db: &DatabaseConnection, cat_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let ids = ids_for_cat(db, cat_id).await?;
    Entity::find()
        .filter(Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Toys the cat does not have yet; feeds the "available toys" list on the
/// detail view.
pub async fn not_for_cat(db: &DatabaseConnection, cat_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let ids = ids_for_cat(db, cat_id).await?;
    Entity::find()
        .filter(Column::Id.is_not_in(ids))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
