use crate::error::ApiError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections are reported as [`ApiError`].
///
/// Malformed or mistyped bodies answer 400 with the usual error JSON
/// instead of axum's plain-text 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
