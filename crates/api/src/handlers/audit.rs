//! Handlers for the `/audit` resource. Read-only, admin only.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::AuditQuery;
use wardtrack_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/audit
///
/// Filterable audit trail, newest first.
pub async fn query_audit_log(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AuditQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = AuditLogRepo::query(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/audit/entity/{entity_type}/{entity_id}
///
/// Full trail for one entity, oldest first.
pub async fn entity_trail(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let entries = AuditLogRepo::list_for_entity(&state.pool, &entity_type, entity_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
