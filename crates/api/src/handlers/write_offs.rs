//! Handlers for the `/write-offs` resource.
//!
//! A write-off record documents asset disposal. Approval decommissions the
//! asset in the same transaction; approved records are immutable.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wardtrack_core::asset_status;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::types::DbId;
use wardtrack_core::write_off_status;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::write_off::{CreateWriteOff, UpdateWriteOff, WriteOffRecord};
use wardtrack_db::repositories::{AssetRepo, AuditLogRepo, WriteOffRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAssetManager, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /write-offs`.
#[derive(Debug, Deserialize)]
pub struct ListWriteOffsParams {
    pub status: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Write-off record",
        id,
    })
}

async fn load(pool: &sqlx::PgPool, id: DbId) -> AppResult<WriteOffRecord> {
    WriteOffRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/write-offs
pub async fn list_write_offs(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ListWriteOffsParams>,
) -> AppResult<impl IntoResponse> {
    let records = WriteOffRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/write-offs/{id}
pub async fn get_write_off(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = load(&state.pool, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/write-offs
///
/// Draft a write-off record for an asset. The asset must exist and must not
/// already be decommissioned.
pub async fn create_write_off(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Json(input): Json<CreateWriteOff>,
) -> AppResult<impl IntoResponse> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Write-off reason must not be empty".into(),
        )));
    }
    write_off_status::validate_method(&input.method)?;

    let asset = AssetRepo::find_by_id(&state.pool, input.asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: input.asset_id,
        }))?;
    if asset.status == asset_status::STATUS_DECOMMISSIONED {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Asset {} is already decommissioned",
            asset.asset_tag
        ))));
    }

    let mut tx = state.pool.begin().await?;
    let record = WriteOffRepo::create(&mut tx, &input, actor.user_id).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::WRITE_OFF_RECORD.to_string(),
            entity_id: Some(record.id),
            user_id: Some(actor.user_id),
            description: format!("Write-off drafted for asset {}", asset.asset_tag),
            details_json: serde_json::json!({ "method": record.method }),
        },
    )
    .await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/write-offs/{id}
///
/// Edit the reason or method. Rejected immediately for approved records.
pub async fn update_write_off(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWriteOff>,
) -> AppResult<impl IntoResponse> {
    if let Some(method) = &input.method {
        write_off_status::validate_method(method)?;
    }
    let record = load(&state.pool, id).await?;
    write_off_status::validate_mutable(&record.status)?;

    let mut tx = state.pool.begin().await?;
    let updated = WriteOffRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_UPDATE.to_string(),
            entity_type: entity_types::WRITE_OFF_RECORD.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Write-off record {} updated", updated.id),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/write-offs/{id}/submit
///
/// Draft -> pending approval.
pub async fn submit(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = load(&state.pool, id).await?;
    write_off_status::validate_transition(
        &record.status,
        write_off_status::STATUS_PENDING_APPROVAL,
    )?;

    let mut tx = state.pool.begin().await?;
    let updated = WriteOffRepo::set_status(
        &mut tx,
        id,
        write_off_status::STATUS_PENDING_APPROVAL,
        None,
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::STATUS_CHANGE.to_string(),
            entity_type: entity_types::WRITE_OFF_RECORD.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Write-off record {} submitted for approval", updated.id),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/write-offs/{id}/approve
///
/// Pending approval -> approved. Admin only. The asset is decommissioned in
/// the same transaction.
pub async fn approve(
    RequireAdmin(actor): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let record = WriteOffRepo::find_by_id_tx(&mut tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    write_off_status::validate_transition(&record.status, write_off_status::STATUS_APPROVED)?;

    let asset = AssetRepo::find_by_id_tx(&mut tx, record.asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: record.asset_id,
        }))?;
    asset_status::validate_transition(&asset.status, asset_status::STATUS_DECOMMISSIONED)?;

    let updated = WriteOffRepo::set_status(
        &mut tx,
        id,
        write_off_status::STATUS_APPROVED,
        Some(actor.user_id),
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    AssetRepo::set_status(
        &mut tx,
        asset.id,
        asset_status::STATUS_DECOMMISSIONED,
        asset.row_version,
    )
    .await?
    .ok_or(AppError::Core(CoreError::Conflict(
        "Asset was modified by another user; reload and retry".to_string(),
    )))?;

    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::APPROVE.to_string(),
            entity_type: entity_types::WRITE_OFF_RECORD.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Write-off approved; asset {} decommissioned",
                asset.asset_tag
            ),
            details_json: serde_json::json!({ "asset_id": asset.id, "method": updated.method }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        write_off_id = updated.id,
        asset_id = asset.id,
        "Write-off approved, asset decommissioned"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/write-offs/{id}/reject
///
/// Pending approval -> rejected. Admin only.
pub async fn reject(
    RequireAdmin(actor): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = load(&state.pool, id).await?;
    write_off_status::validate_transition(&record.status, write_off_status::STATUS_REJECTED)?;

    let mut tx = state.pool.begin().await?;
    let updated = WriteOffRepo::set_status(
        &mut tx,
        id,
        write_off_status::STATUS_REJECTED,
        Some(actor.user_id),
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::REJECT.to_string(),
            entity_type: entity_types::WRITE_OFF_RECORD.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Write-off record {} rejected", updated.id),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}
