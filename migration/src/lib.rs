pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_user_table;
mod m20250901_000002_create_fuel_table;
mod m20250901_000003_create_combustion_request_table;
mod m20250901_000004_create_combustion_request_fuel_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_user_table::Migration),
            Box::new(m20250901_000002_create_fuel_table::Migration),
            Box::new(m20250901_000003_create_combustion_request_table::Migration),
            Box::new(m20250901_000004_create_combustion_request_fuel_table::Migration),
        ]
    }
}
