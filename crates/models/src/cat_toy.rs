use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::prelude::*, DatabaseConnection, DbErr, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Join table for the cat/toy many-to-many relation. The composite primary
/// key makes duplicate pairs impossible at the storage level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cat_toy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cat_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub toy_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Cat,
    Toy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Cat => Entity::belongs_to(super::cat::Entity)
                .from(Column::CatId)
                .to(super::cat::Column::Id)
                .into(),
            Relation::Toy => Entity::belongs_to(super::toy::Entity)
                .from(Column::ToyId)
                .to(super::toy::Column::Id)
                .into(),
        }
    }
}

impl Related<super::toy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Toy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Idempotent add: inserting an already-present pair is a no-op.
pub async fn link(db: &DatabaseConnection, cat_id: Uuid, toy_id: Uuid) -> Result<(), errors::ModelError> {
    let am = ActiveModel { cat_id: Set(cat_id), toy_id: Set(toy_id) };
    let insert = Entity::insert(am).on_conflict(
        OnConflict::columns([Column::CatId, Column::ToyId])
            .do_nothing()
            .to_owned(),
    );
    match insert.exec(db).await {
        Ok(_) => Ok(()),
        // DO NOTHING reports no inserted row; the pair already existed.
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(errors::ModelError::Db(e.to_string())),
    }
}

/// Idempotent remove: deleting an absent pair is a no-op.
pub async fn unlink(db: &DatabaseConnection, cat_id: Uuid, toy_id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_many()
        .filter(Column::CatId.eq(cat_id))
        .filter(Column::ToyId.eq(toy_id))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
