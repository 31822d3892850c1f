#![cfg(test)]
use std::time::Duration;

use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

use crate::access::Principal;

// Migrations run at most once per test process; `false` means no database.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::from_file().unwrap_or_else(DatabaseConfig::from_env);
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.connect_timeout = Duration::from_secs(2);
    cfg.acquire_timeout = Duration::from_secs(5);
    cfg
}

/// A migrated connection, or `None` when `SKIP_DB_TESTS` is set or Postgres is unreachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let ready = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&test_config()).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    // Fresh connection for the current test's runtime
    connect_with_config(&test_config()).await.ok()
}

pub fn superuser() -> Principal {
    Principal::Superuser { user_id: uuid::Uuid::new_v4() }
}

pub fn unique(prefix: &str) -> String {
    format!("{prefix}_{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}
