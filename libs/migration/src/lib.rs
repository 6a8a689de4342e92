pub use sea_orm_migration::prelude::*;

mod m20260115_000000_create_rooms;
mod m20260115_000001_create_reservations;
mod m20260115_000002_create_products;
mod m20260115_000003_create_orders;
mod m20260115_000004_create_order_lines;
mod m20260120_000000_seed_initial_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000000_create_rooms::Migration),
            Box::new(m20260115_000001_create_reservations::Migration),
            Box::new(m20260115_000002_create_products::Migration),
            Box::new(m20260115_000003_create_orders::Migration),
            Box::new(m20260115_000004_create_order_lines::Migration),
            Box::new(m20260120_000000_seed_initial_data::Migration),
        ]
    }
}
