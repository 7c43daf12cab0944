//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_cat;
mod m20240101_000003_create_toy;
mod m20240101_000004_create_cat_toy;
mod m20240101_000005_create_feeding;
mod m20240101_000006_create_photo;
mod m20240101_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_cat::Migration),
            Box::new(m20240101_000003_create_toy::Migration),
            Box::new(m20240101_000004_create_cat_toy::Migration),
            Box::new(m20240101_000005_create_feeding::Migration),
            Box::new(m20240101_000006_create_photo::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000009_add_indexes::Migration),
        ]
    }
}
