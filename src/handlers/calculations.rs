use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::schemas::AppState;
use crate::services::calculations::{self, Computed};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::calculation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for creating or replacing a calculation
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CalculationRequest {
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
    /// One of `Add`, `Sub`, `Multiply`, `Divide`
    #[schema(example = "Divide")]
    pub op_type: String,
}

/// Stored calculation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    pub id: i32,
    pub a: f64,
    pub b: f64,
    pub op_type: String,
    pub result: f64,
}

impl From<calculation::Model> for CalculationResponse {
    fn from(model: calculation::Model) -> Self {
        Self {
            id: model.id,
            a: model.a,
            b: model.b,
            op_type: model.op_type.to_string(),
            result: model.result,
        }
    }
}

/// Computed but not stored calculation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalculationPreview {
    pub a: f64,
    pub b: f64,
    pub op_type: String,
    pub result: f64,
}

impl From<Computed> for CalculationPreview {
    fn from(computed: Computed) -> Self {
        Self {
            a: computed.a,
            b: computed.b,
            op_type: computed.op_type.to_string(),
            result: computed.result,
        }
    }
}

/// Acknowledgement of a deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// Compute and store a calculation
#[utoipa::path(
    post,
    path = "/calculations",
    tag = "calculations",
    request_body = CalculationRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Calculation created successfully", body = CalculationResponse),
        (status = 400, description = "Invalid input, e.g. division by zero or unknown operation", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn create_calculation(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<(StatusCode, Json<CalculationResponse>), ApiError> {
    trace!("Entering create_calculation function");

    let calculation_model =
        calculations::create(&state.db, user.id(), request.a, request.b, &request.op_type).await?;

    Ok((StatusCode::CREATED, Json(CalculationResponse::from(calculation_model))))
}

/// Compute a calculation without storing it
#[utoipa::path(
    post,
    path = "/calculations/preview",
    tag = "calculations",
    request_body = CalculationRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Calculation computed", body = CalculationPreview),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(_user))]
pub async fn preview_calculation(
    _user: CurrentUser,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<Json<CalculationPreview>, ApiError> {
    let computed = calculations::evaluate(request.a, request.b, &request.op_type)?;
    debug!("Preview computed: {}", computed.result);
    Ok(Json(CalculationPreview::from(computed)))
}

/// List the caller's calculations
#[utoipa::path(
    get,
    path = "/calculations",
    tag = "calculations",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Calculations retrieved successfully", body = Vec<CalculationResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn get_calculations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<CalculationResponse>>, ApiError> {
    let calculation_models = calculations::list(&state.db, user.id()).await?;

    info!("Successfully retrieved {} calculations", calculation_models.len());
    Ok(Json(
        calculation_models
            .into_iter()
            .map(CalculationResponse::from)
            .collect(),
    ))
}

/// Get one of the caller's calculations
#[utoipa::path(
    get,
    path = "/calculations/{calculation_id}",
    tag = "calculations",
    params(
        ("calculation_id" = i32, Path, description = "Calculation ID"),
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Calculation retrieved successfully", body = CalculationResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Calculation not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn get_calculation(
    Path(calculation_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CalculationResponse>, ApiError> {
    let calculation_model = calculations::get(&state.db, calculation_id, user.id()).await?;
    Ok(Json(CalculationResponse::from(calculation_model)))
}

/// Replace operands and operation of one of the caller's calculations
#[utoipa::path(
    put,
    path = "/calculations/{calculation_id}",
    tag = "calculations",
    params(
        ("calculation_id" = i32, Path, description = "Calculation ID"),
    ),
    request_body = CalculationRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Calculation updated successfully", body = CalculationResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Calculation not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn update_calculation(
    Path(calculation_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let calculation_model = calculations::update(
        &state.db,
        calculation_id,
        user.id(),
        request.a,
        request.b,
        &request.op_type,
    )
    .await?;

    Ok(Json(CalculationResponse::from(calculation_model)))
}

/// Delete one of the caller's calculations
#[utoipa::path(
    delete,
    path = "/calculations/{calculation_id}",
    tag = "calculations",
    params(
        ("calculation_id" = i32, Path, description = "Calculation ID"),
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Calculation deleted successfully", body = DeletedResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Calculation not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn delete_calculation(
    Path(calculation_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DeletedResponse>, ApiError> {
    calculations::delete(&state.db, calculation_id, user.id()).await?;
    Ok(Json(DeletedResponse {
        deleted: calculation_id,
    }))
}
