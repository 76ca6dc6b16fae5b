use crate::schemas::AppState;
use crate::services::AuthService;
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://calcbook.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Connect to the database with a bounded connect/acquire timeout.
pub async fn connect(database_url: &str, connect_timeout_secs: u64) -> Result<DatabaseConnection> {
    info!("Connecting to database: {}", database_url);

    let timeout = Duration::from_secs(connect_timeout_secs);
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    debug!("Database connection established");
    Ok(db)
}

/// Initialize application state for the given database and password hashing cost
pub async fn initialize_app_state_with_url(
    database_url: &str,
    connect_timeout_secs: u64,
    password_hash_cost: u32,
) -> Result<AppState> {
    let db = connect(database_url, connect_timeout_secs).await?;
    let auth = AuthService::new(password_hash_cost);

    Ok(AppState { db, auth })
}
