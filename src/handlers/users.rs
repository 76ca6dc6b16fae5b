use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::schemas::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::{Valid, ValidRejection};
use model::entities::user;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering a new user
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Username (must be unique)
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    /// Optional contact email
    #[validate(email)]
    pub email: Option<String>,
    /// Plain-text password, only ever stored as a salted hash
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for logging in
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Passwords stay out of `#[instrument]` output.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// User summary returned after registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
        }
    }
}

/// Bearer token issued on login
#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Invalid request or username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    request: Result<Valid<Json<RegisterRequest>>, ValidRejection<JsonRejection>>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    trace!("Entering register function");
    let Valid(Json(request)) = request?;
    debug!("Registering username '{}'", request.username);

    let user_model = state
        .auth
        .register(&state.db, &request.username, &request.password, request.email)
        .await?;

    info!("User registered successfully with ID: {}", user_model.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user_model))))
}

/// Log in and receive a fresh bearer token
///
/// Any previously issued token for the user stops working.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    debug!("Login attempt");

    let token = state
        .auth
        .login(&state.db, &request.username, &request.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
