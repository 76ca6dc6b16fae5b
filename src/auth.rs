/// Bearer token extractor for authenticated routes
use crate::{error::ApiError, schemas::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use model::entities::user;

/// The user resolved from the request's `Authorization: Bearer <token>` header.
///
/// Handlers taking this extractor reject unauthenticated requests with 401
/// before their body runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let authorization = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| ApiError::Unauthenticated("Invalid authorization header"))?,
            ),
            None => None,
        };

        let user_model = state.auth.resolve(&state.db, authorization).await?;
        Ok(CurrentUser(user_model))
    }
}
