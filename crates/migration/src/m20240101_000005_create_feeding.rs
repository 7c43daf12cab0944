//! Create `feeding` table with FK to `cat`.
//!
//! Feedings are append-only; they are removed only via the cat cascade.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feeding::Table)
                    .if_not_exists()
                    .col(uuid(Feeding::Id).primary_key())
                    .col(date(Feeding::Date).not_null())
                    .col(string_len(Feeding::Meal, 16).not_null())
                    .col(uuid(Feeding::CatId).not_null())
                    .col(timestamp_with_time_zone(Feeding::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feeding_cat")
                            .from(Feeding::Table, Feeding::CatId)
                            .to(Cat::Table, Cat::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Feeding::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Feeding { Table, Id, Date, Meal, CatId, CreatedAt }

#[derive(DeriveIden)]
enum Cat { Table, Id }
