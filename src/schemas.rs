use crate::handlers::{
    calculations::{CalculationPreview, CalculationRequest, CalculationResponse, DeletedResponse},
    users::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
};
use crate::services::AuthService;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Credential hashing and token resolution
    pub auth: AuthService,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::register,
        crate::handlers::users::login,
        crate::handlers::calculations::create_calculation,
        crate::handlers::calculations::preview_calculation,
        crate::handlers::calculations::get_calculations,
        crate::handlers::calculations::get_calculation,
        crate::handlers::calculations::update_calculation,
        crate::handlers::calculations::delete_calculation,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            TokenResponse,
            CalculationRequest,
            CalculationResponse,
            CalculationPreview,
            DeletedResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Registration and login"),
        (name = "calculations", description = "Calculations owned by the authenticated user"),
    ),
    info(
        title = "Calcbook API",
        description = "Calculation bookkeeping service - arithmetic operations computed, stored and scoped to their owner",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
