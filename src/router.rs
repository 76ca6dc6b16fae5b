use crate::handlers::{
    calculations::{
        create_calculation, delete_calculation, get_calculation, get_calculations,
        preview_calculation, update_calculation,
    },
    health::health_check,
    users::{login, register},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Identity
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        // Calculations, all scoped to the bearer of the token
        .route(
            "/calculations",
            get(get_calculations).post(create_calculation),
        )
        .route("/calculations/preview", post(preview_calculation))
        .route(
            "/calculations/:calculation_id",
            get(get_calculation)
                .put(update_calculation)
                .delete(delete_calculation),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
