use crate::schemas::ErrorResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_valid::{ValidRejection, ValidationRejection};
use compute::ComputeError;
use sea_orm::DbErr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced while serving a request.
///
/// Domain failures map to 4xx responses with a descriptive message. Storage and
/// hashing faults are logged and answered with a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<ComputeError> for ApiError {
    fn from(error: ComputeError) -> Self {
        match error {
            ComputeError::UnknownOperation(id) => ApiError::UnknownOperation(id),
            ComputeError::DivisionByZero => ApiError::DivisionByZero,
            ComputeError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<ValidRejection<JsonRejection>> for ApiError {
    fn from(rejection: ValidRejection<JsonRejection>) -> Self {
        match rejection {
            ValidationRejection::Valid(errors) => ApiError::Validation(errors.to_string()),
            ValidationRejection::Inner(inner) => inner.into(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::UnknownOperation(_)
            | ApiError::DivisionByZero
            | ApiError::DuplicateUsername(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::PasswordHash(_) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::UnknownOperation(_) => "UNKNOWN_OPERATION",
            ApiError::DivisionByZero => "DIVISION_BY_ZERO",
            ApiError::DuplicateUsername(_) => "USERNAME_ALREADY_EXISTS",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::PasswordHash(_) | ApiError::Task(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            ApiError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {:?}", e);
                "Internal server error".to_string()
            }
            ApiError::Task(e) => {
                tracing::error!("Background task failed: {:?}", e);
                "Internal server error".to_string()
            }
            ApiError::UnknownOperation(id) => format!(
                "Unknown operation: {} (expected one of {})",
                id,
                compute::supported_operations().collect::<Vec<_>>().join(", ")
            ),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
            success: false,
        };

        (self.status(), Json(body)).into_response()
    }
}
