use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::access::repo::seaorm::SeaOrmBindingRepository;
use service::access::AccessService;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`), falling back to environment variables.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => AppConfig::from_env().map_err(|env_err| {
            StartupError::InvalidConfig(format!("config file: {file_err}; environment: {env_err}"))
        }),
    }
}

/// Wire the services over one connection pool.
pub fn build_state(db: DatabaseConnection, auth: &configs::AuthConfig) -> ServerState {
    let auth_cfg = AuthConfig {
        jwt_secret: Some(auth.jwt_secret.clone()),
        token_ttl_hours: auth.token_ttl_hours,
        ..AuthConfig::default()
    };
    ServerState {
        auth: AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), auth_cfg),
        access: AccessService::new(Arc::new(SeaOrmBindingRepository { db: db.clone() })),
        db,
    }
}

fn bind_addr(cfg: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {e}", cfg.host, cfg.port)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Connect, migrate, and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db_cfg = models::db::DatabaseConfig::from_settings(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Migrator::up(&db, None).await.map_err(|e| StartupError::Database(e.to_string()))?;
    info!(event = "migrations_applied", "database schema up to date");

    let state = build_state(db, &cfg.auth);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting business directory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let cfg = configs::ServerConfig { host: "not a host".into(), port: 80, worker_threads: None };
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_accepts_default() {
        let addr = bind_addr(&configs::ServerConfig::default()).unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
