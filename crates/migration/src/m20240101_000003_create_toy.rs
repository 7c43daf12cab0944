//! Create `toy` table.
//!
//! Toys form a shared catalog with no owning user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Toy::Table)
                    .if_not_exists()
                    .col(uuid(Toy::Id).primary_key())
                    .col(string_len(Toy::Name, 128).not_null())
                    .col(string_len(Toy::Color, 64).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Toy::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Toy { Table, Id, Name, Color }
