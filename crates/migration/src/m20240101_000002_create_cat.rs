//! Create `cat` table with FK to `user`.
//!
//! The owner is bound at insert time and never reassigned; deleting the
//! owning user removes their cats.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cat::Table)
                    .if_not_exists()
                    .col(uuid(Cat::Id).primary_key())
                    .col(string_len(Cat::Name, 128).not_null())
                    .col(string_len(Cat::Breed, 128).not_null())
                    .col(text(Cat::Description).not_null())
                    .col(integer(Cat::Age).not_null())
                    .col(uuid(Cat::UserId).not_null())
                    .col(timestamp_with_time_zone(Cat::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Cat::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cat_user")
                            .from(Cat::Table, Cat::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cat::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cat { Table, Id, Name, Breed, Description, Age, UserId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
