//! Create `cat_toy` join table.
//!
//! Composite primary key keeps the cat/toy relation duplicate-free; both
//! sides cascade so deleting a cat never touches the shared toy rows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatToy::Table)
                    .if_not_exists()
                    .col(uuid(CatToy::CatId).not_null())
                    .col(uuid(CatToy::ToyId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_cat_toy")
                            .col(CatToy::CatId)
                            .col(CatToy::ToyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cat_toy_cat")
                            .from(CatToy::Table, CatToy::CatId)
                            .to(Cat::Table, Cat::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cat_toy_toy")
                            .from(CatToy::Table, CatToy::ToyId)
                            .to(Toy::Table, Toy::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CatToy::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CatToy { Table, CatId, ToyId }

#[derive(DeriveIden)]
enum Cat { Table, Id }

#[derive(DeriveIden)]
enum Toy { Table, Id }
