//! Handlers for the `/requests` resource: IT request CRUD, assignment, and
//! status transitions.
//!
//! Every transition is validated against the request status table and
//! appends exactly one activity row.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::request_status;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::request::{CreateRequest, ItRequest, RequestSearchParams};
use wardtrack_db::repositories::{AuditLogRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireItSupport};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for the transition endpoints (hold, resume, complete, cancel).
#[derive(Debug, Deserialize, Default)]
pub struct TransitionRequest {
    pub comments: Option<String>,
    pub row_version: i64,
}

/// Body for `POST /requests/{id}/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub assigned_to: DbId,
    pub row_version: i64,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "IT request",
        id,
    })
}

fn stale_version() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Request was modified by another user; reload and retry".to_string(),
    ))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/requests
pub async fn list_requests(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<RequestSearchParams>,
) -> AppResult<impl IntoResponse> {
    let requests = RequestRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/requests/{id}
pub async fn get_request(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/requests
///
/// Submit a new IT request. Any authenticated user; the submitter becomes
/// `requested_by`.
pub async fn create_request(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Request title must not be empty".into(),
        )));
    }
    request_status::validate_priority(&input.priority)?;

    let mut tx = state.pool.begin().await?;
    let request = RequestRepo::create(&mut tx, &input, auth.user_id).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::IT_REQUEST.to_string(),
            entity_id: Some(request.id),
            user_id: Some(auth.user_id),
            description: format!("Request {} submitted", request.request_number),
            details_json: serde_json::json!({ "priority": request.priority }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        request_id = request.id,
        number = %request.request_number,
        "IT request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/requests/{id}/activities
pub async fn list_activities(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let activities = RequestRepo::list_activities(&state.pool, id).await?;
    Ok(Json(DataResponse { data: activities }))
}

// ---------------------------------------------------------------------------
// Assignment and transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/requests/{id}/assign
///
/// Assign the request to a handler and move it to `in_progress` when still
/// submitted.
pub async fn assign_request(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if request_status::is_terminal(&request.status) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Request {} is already {}",
            request.request_number, request.status
        ))));
    }

    let mut tx = state.pool.begin().await?;
    let mut updated = RequestRepo::set_assignment(
        &mut tx,
        id,
        Some(input.assigned_to),
        input.row_version,
    )
    .await?
    .ok_or_else(stale_version)?;

    if updated.status == request_status::STATUS_SUBMITTED {
        updated = RequestRepo::set_status_with_activity(
            &mut tx,
            id,
            request_status::STATUS_IN_PROGRESS,
            actor.user_id,
            Some("Assigned for handling"),
            updated.row_version,
        )
        .await?
        .ok_or_else(stale_version)?;
    }

    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ASSIGNMENT.to_string(),
            entity_type: entity_types::IT_REQUEST.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Request {} assigned to user {}",
                updated.request_number, input.assigned_to
            ),
            details_json: serde_json::json!({ "assigned_to": input.assigned_to }),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/requests/{id}/hold
///
/// Requires non-empty comments explaining why work is paused.
pub async fn hold_request(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, id, request_status::STATUS_ON_HOLD, &input, &actor, true).await
}

/// POST /api/v1/requests/{id}/resume
pub async fn resume_request(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, id, request_status::STATUS_IN_PROGRESS, &input, &actor, false).await
}

/// POST /api/v1/requests/{id}/complete
pub async fn complete_request(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, id, request_status::STATUS_COMPLETED, &input, &actor, false).await
}

/// POST /api/v1/requests/{id}/cancel
///
/// Requires non-empty comments explaining the cancellation.
pub async fn cancel_request(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, id, request_status::STATUS_CANCELLED, &input, &actor, true).await
}

async fn transition(
    state: &AppState,
    id: DbId,
    new_status: &str,
    input: &TransitionRequest,
    actor: &AuthUser,
    comments_required: bool,
) -> AppResult<Json<DataResponse<ItRequest>>> {
    match &input.comments {
        Some(comments) => request_status::validate_comments(comments)?,
        None if comments_required => {
            return Err(AppError::Core(CoreError::Validation(
                "Comments are required for this transition".to_string(),
            )))
        }
        None => {}
    }
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    request_status::validate_transition(&request.status, new_status)?;

    let mut tx = state.pool.begin().await?;
    let updated = RequestRepo::set_status_with_activity(
        &mut tx,
        id,
        new_status,
        actor.user_id,
        input.comments.as_deref(),
        input.row_version,
    )
    .await?
    .ok_or_else(stale_version)?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::STATUS_CHANGE.to_string(),
            entity_type: entity_types::IT_REQUEST.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Request {} status {} -> {}",
                updated.request_number, request.status, updated.status
            ),
            details_json: serde_json::json!({ "comments": input.comments }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        request_id = updated.id,
        from = %request.status,
        to = %updated.status,
        "Request status changed"
    );

    Ok(Json(DataResponse { data: updated }))
}
