/// Input validation that needs no database
pub mod validation_tests;

/// Database connection tests
pub mod db_tests;

/// CRUD and constraint tests against a live Postgres
pub mod crud_tests;

use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};

/// Connect and migrate, or `None` when `SKIP_DB_TESTS` is set or Postgres is unreachable.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.min_connections = 1;
    cfg.connect_timeout = Duration::from_secs(2);
    cfg.acquire_timeout = Duration::from_secs(2);
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}
