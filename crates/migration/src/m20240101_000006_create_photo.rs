//! Create `photo` table with FK to `cat`.
//!
//! Stores the public URL only; the blob itself lives in the external store.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photo::Table)
                    .if_not_exists()
                    .col(uuid(Photo::Id).primary_key())
                    .col(string_len(Photo::Url, 512).unique_key().not_null())
                    .col(uuid(Photo::CatId).not_null())
                    .col(timestamp_with_time_zone(Photo::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_cat")
                            .from(Photo::Table, Photo::CatId)
                            .to(Cat::Table, Cat::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Photo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Photo { Table, Id, Url, CatId, CreatedAt }

#[derive(DeriveIden)]
enum Cat { Table, Id }
