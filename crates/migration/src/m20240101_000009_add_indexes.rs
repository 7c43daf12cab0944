//! Secondary indexes for the hot lookup paths: cats by owner, feedings and
//! photos by cat.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_cat_user_id")
                    .table(Cat::Table)
                    .col(Cat::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_feeding_cat_id")
                    .table(Feeding::Table)
                    .col(Feeding::CatId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_photo_cat_id")
                    .table(Photo::Table)
                    .col(Photo::CatId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_photo_cat_id").table(Photo::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_feeding_cat_id").table(Feeding::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cat_user_id").table(Cat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cat { Table, UserId }

#[derive(DeriveIden)]
enum Feeding { Table, CatId }

#[derive(DeriveIden)]
enum Photo { Table, CatId }
