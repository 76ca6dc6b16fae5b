use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing::{debug, error, info, trace};

use crate::cli::DatabaseArgs;
use crate::config::connect;

/// Apply all pending migrations on an open connection.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    info!("Running database migrations");
    trace!("Executing migration up command");
    match Migrator::up(db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
            debug!("All pending migrations have been applied");
            Ok(())
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            Err(e.into())
        }
    }
}

pub async fn init_database(database: &DatabaseArgs) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    let db = match connect(&database.database_url, database.connect_timeout).await {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database.database_url, e);
            return Err(e);
        }
    };

    run_migrations(&db).await?;

    info!("Database initialization completed successfully!");
    Ok(())
}
