//! Gatehouse Server — application entry point.

use gatehouse_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gatehouse=info".parse()?),
        )
        .json()
        .init();

    tracing::info!("Starting Gatehouse server...");

    let config = DbConfig {
        url: env_or("GATEHOUSE_DB_URL", "127.0.0.1:8000"),
        namespace: env_or("GATEHOUSE_DB_NS", "gatehouse"),
        database: env_or("GATEHOUSE_DB_NAME", "main"),
        username: env_or("GATEHOUSE_DB_USER", "root"),
        password: env_or("GATEHOUSE_DB_PASS", "root"),
    };

    let manager = DbManager::connect(&config).await?;
    gatehouse_db::run_migrations(manager.client()).await?;
    gatehouse_db::seed_permission_catalog(manager.client()).await?;

    tracing::info!("Gatehouse ready");

    // TODO: mount the HTTP layer once the router lands

    Ok(())
}
