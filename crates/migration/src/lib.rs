//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_app_user;
mod m20240301_000002_create_catalog;
mod m20240301_000003_create_company;
mod m20240301_000004_create_product;
mod m20240301_000005_create_offering;
mod m20240301_000006_create_content;
mod m20240301_000007_create_inbox;
mod m20240301_000008_create_company_user;
mod m20240301_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_app_user::Migration),
            Box::new(m20240301_000002_create_catalog::Migration),
            Box::new(m20240301_000003_create_company::Migration),
            Box::new(m20240301_000004_create_product::Migration),
            Box::new(m20240301_000005_create_offering::Migration),
            Box::new(m20240301_000006_create_content::Migration),
            Box::new(m20240301_000007_create_inbox::Migration),
            Box::new(m20240301_000008_create_company_user::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000009_add_indexes::Migration),
        ]
    }
}
