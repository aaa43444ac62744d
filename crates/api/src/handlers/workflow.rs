//! Handlers for the repair workflow endpoints.
//!
//! Thin wrappers over [`WorkflowService`]. Business rule failures come back
//! as HTTP 200 with `success = false` so the client can show the reason;
//! only infrastructure problems surface as error statuses.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use wardtrack_core::error::CoreError;
use wardtrack_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireItSupport;
use crate::response::DataResponse;
use crate::services::workflow::{
    CompleteRepairInput, GenerateProcurementInput, ProcurementReceivedInput, ReplaceAssetInput,
    WorkflowService,
};
use crate::state::AppState;

/// POST /api/v1/workflow/{request_id}/start
pub async fn start_repair(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let result = WorkflowService::start_repair(&state.pool, request_id, actor.user_id).await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/workflow/{request_id}/replace
pub async fn replace_asset(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<ReplaceAssetInput>,
) -> AppResult<impl IntoResponse> {
    let result =
        WorkflowService::replace_asset_temporarily(&state.pool, request_id, &input, actor.user_id)
            .await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/workflow/{request_id}/procurement
pub async fn generate_procurement(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<GenerateProcurementInput>,
) -> AppResult<impl IntoResponse> {
    let result = WorkflowService::generate_procurement_from_repair(
        &state.pool,
        request_id,
        &input,
        actor.user_id,
    )
    .await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/workflow/{request_id}/procurement-received
pub async fn procurement_received(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<ProcurementReceivedInput>,
) -> AppResult<impl IntoResponse> {
    let result = WorkflowService::update_request_from_procurement_completion(
        &state.pool,
        request_id,
        &input,
        actor.user_id,
    )
    .await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/workflow/{request_id}/complete
pub async fn complete_repair(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<CompleteRepairInput>,
) -> AppResult<impl IntoResponse> {
    let result =
        WorkflowService::complete_asset_repair(&state.pool, request_id, &input, actor.user_id)
            .await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/workflow/{request_id}/status
pub async fn workflow_status(
    RequireItSupport(_actor): RequireItSupport,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let status = WorkflowService::get_workflow_status(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IT request",
            id: request_id,
        }))?;
    Ok(Json(DataResponse { data: status }))
}
