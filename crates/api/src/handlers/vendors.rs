//! Handlers for the `/vendors` lookup resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::vendor::CreateVendor;
use wardtrack_db::repositories::{AuditLogRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAssetManager, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/vendors
pub async fn list_vendors(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let vendors = VendorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: vendors }))
}

/// GET /api/v1/vendors/{id}
pub async fn get_vendor(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = VendorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        }))?;
    Ok(Json(DataResponse { data: vendor }))
}

/// POST /api/v1/vendors
pub async fn create_vendor(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Json(input): Json<CreateVendor>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Vendor name must not be empty".into(),
        )));
    }

    let vendor = VendorRepo::create(&state.pool, &input).await?;

    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::VENDOR.to_string(),
            entity_id: Some(vendor.id),
            user_id: Some(actor.user_id),
            description: format!("Vendor '{}' created", vendor.name),
            details_json: serde_json::json!({}),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: vendor })))
}

/// DELETE /api/v1/vendors/{id}
///
/// Soft-deactivates the vendor; historical procurement keeps its reference.
pub async fn deactivate_vendor(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let changed = VendorRepo::deactivate(&state.pool, id).await?;
    if !changed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        }));
    }

    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::ENTITY_DELETE.to_string(),
            entity_type: entity_types::VENDOR.to_string(),
            entity_id: Some(id),
            user_id: Some(actor.user_id),
            description: format!("Vendor {id} deactivated"),
            details_json: serde_json::json!({}),
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
