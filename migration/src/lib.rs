//! Database migrations for the LicenseHub admin service.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_01_06_090000_create_admin_organizations;
mod m2025_01_06_090100_create_admin_api_catalog;
mod m2025_01_06_090200_create_admin_webhooks;
mod m2025_01_06_090300_create_admin_data_exports;
mod m2025_01_06_090400_create_admin_bi;
mod m2025_01_06_090500_create_admin_market_intelligence;
mod m2025_01_06_090600_create_admin_team_and_audit;
mod m2025_01_06_090700_create_admin_preferences;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_06_090000_create_admin_organizations::Migration),
            Box::new(m2025_01_06_090100_create_admin_api_catalog::Migration),
            Box::new(m2025_01_06_090200_create_admin_webhooks::Migration),
            Box::new(m2025_01_06_090300_create_admin_data_exports::Migration),
            Box::new(m2025_01_06_090400_create_admin_bi::Migration),
            Box::new(m2025_01_06_090500_create_admin_market_intelligence::Migration),
            Box::new(m2025_01_06_090600_create_admin_team_and_audit::Migration),
            Box::new(m2025_01_06_090700_create_admin_preferences::Migration),
        ]
    }
}
