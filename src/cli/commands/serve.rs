use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::cli::{DatabaseArgs, ServerArgs};
use crate::config::initialize_app_state_with_url;
use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(database: &DatabaseArgs, server: &ServerArgs) -> Result<()> {
    trace!("Entering serve function");
    info!("Calcbook application starting up");

    let state = build_state(database, server).await?;
    run_server(state, &server.bind_address).await
}

pub(crate) async fn build_state(database: &DatabaseArgs, server: &ServerArgs) -> Result<AppState> {
    trace!("Initializing application state");
    match initialize_app_state_with_url(
        &database.database_url,
        database.connect_timeout,
        server.bcrypt_cost,
    )
    .await
    {
        Ok(state) => {
            debug!("Application state initialized successfully");
            Ok(state)
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            Err(e)
        }
    }
}

/// Bind `bind_address` and serve the API until Ctrl+C.
pub(crate) async fn run_server(state: AppState, bind_address: &str) -> Result<()> {
    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Calcbook API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
