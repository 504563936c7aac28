mod m20261018_101500_create_tables;
mod m20261018_102300_seed_counter;

use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_101500_create_tables::Migration),
            Box::new(m20261018_102300_seed_counter::Migration),
        ]
    }
}
