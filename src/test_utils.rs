use crate::router::create_router;
use crate::schemas::AppState;
use crate::services::AuthService;
use axum::Router;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use model::entities::user;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Lowest cost bcrypt accepts; keeps tests fast.
pub const TEST_HASH_COST: u32 = 4;

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Insert a user directly, bypassing password hashing
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(None),
        password_hash: Set("unused".to_string()),
        token: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create test user")
}

/// Create AppState for testing
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    let auth = AuthService::new(TEST_HASH_COST);

    AppState { db, auth }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is read from RUST_LOG and defaults to WARN.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Create axum app for testing.
///
/// Returns the tracing guard alongside the router; keep it alive for the test's duration.
pub async fn setup_test_app() -> (Router, tracing::subscriber::DefaultGuard) {
    let guard = init_test_tracing();
    let state = setup_test_app_state().await;
    (create_router(state), guard)
}
