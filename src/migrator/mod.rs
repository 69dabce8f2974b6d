use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_rbac_tables;
mod m20250302_000001_create_case_papers;
mod m20250302_000002_create_care_tables;
mod m20250303_000001_create_inventory_items;
mod m20250303_000002_create_activities;
mod m20250304_000001_seed_rbac;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_rbac_tables::Migration),
            Box::new(m20250302_000001_create_case_papers::Migration),
            Box::new(m20250302_000002_create_care_tables::Migration),
            Box::new(m20250303_000001_create_inventory_items::Migration),
            Box::new(m20250303_000002_create_activities::Migration),
            Box::new(m20250304_000001_seed_rbac::Migration),
        ]
    }
}
