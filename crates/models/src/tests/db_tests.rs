use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::setup_test_db;
use crate::db::DatabaseConfig;

#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

#[tokio::test]
async fn test_migrated_tables_exist() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    for table in ["app_user", "company", "product", "company_user", "job_application"] {
        let stmt = Statement::from_string(
            DatabaseBackend::Postgres,
            format!("SELECT to_regclass('public.{table}') IS NOT NULL AS present"),
        );
        let row = db.query_one(stmt).await?.expect("one row");
        let present: bool = row.try_get("", "present")?;
        assert!(present, "missing table {table}");
    }
    Ok(())
}

#[test]
fn settings_convert_to_durations() {
    let settings = configs::DatabaseConfig {
        url: "postgres://localhost/x".into(),
        max_connections: 8,
        min_connections: 2,
        connect_timeout_secs: 3,
        idle_timeout_secs: 60,
        max_lifetime_secs: 120,
        acquire_timeout_secs: 4,
        sqlx_logging: true,
    };
    let cfg = DatabaseConfig::from_settings(&settings);
    assert_eq!(cfg.max_connections, 8);
    assert_eq!(cfg.connect_timeout.as_secs(), 3);
    assert_eq!(cfg.acquire_timeout.as_secs(), 4);
    assert!(cfg.sqlx_logging);
}
