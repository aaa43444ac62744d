//! Handlers for the asset registry: CRUD, status transitions, moves, and
//! assignment.
//!
//! Every mutation runs in one transaction with its audit entry. Update and
//! transition payloads carry the client's `row_version`; a stale version is
//! reported as 409 Conflict.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use wardtrack_core::asset_status;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::types::DbId;
use wardtrack_db::models::asset::{
    Asset, AssetSearchParams, CreateAsset, MoveAsset, UpdateAsset,
};
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::repositories::{AssetRepo, AuditLogRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAssetManager, RequireAuth, RequireItSupport};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `PUT /assets/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAssetRequest {
    /// The version the client last saw; stale versions are rejected.
    pub row_version: i64,
    #[serde(flatten)]
    pub fields: UpdateAsset,
}

/// Body for `POST /assets/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub new_status: String,
    /// Mandatory free-text justification for the transition.
    pub reason: String,
    pub row_version: i64,
}

/// Body for `POST /assets/{id}/move`.
#[derive(Debug, Deserialize)]
pub struct MoveAssetRequest {
    pub new_location_id: Option<DbId>,
    pub new_user_id: Option<DbId>,
    pub reason: String,
    pub row_version: i64,
}

/// Response for `POST /assets/{id}/move`.
#[derive(Debug, Serialize)]
pub struct MoveAssetResult {
    /// False when the requested placement matched the current one and
    /// nothing was written.
    pub changed: bool,
    pub message: String,
    pub asset: Asset,
}

/// Body for `POST /assets/{id}/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignAssetRequest {
    pub user_id: DbId,
    pub row_version: i64,
}

/// Body for `POST /assets/{id}/unassign`.
#[derive(Debug, Deserialize)]
pub struct UnassignAssetRequest {
    pub row_version: i64,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Asset", id })
}

fn stale_version() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Asset was modified by another user; reload and retry".to_string(),
    ))
}

async fn load_asset(pool: &sqlx::PgPool, id: DbId) -> AppResult<Asset> {
    AssetRepo::find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/assets
///
/// List/search assets with optional filters.
pub async fn list_assets(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<AssetSearchParams>,
) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = load_asset(&state.pool, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/assets
///
/// Register a new asset. Asset managers only.
pub async fn create_asset(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    if input.asset_tag.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Asset tag must not be empty".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    let asset = AssetRepo::create(&mut tx, &input).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::ASSET.to_string(),
            entity_id: Some(asset.id),
            user_id: Some(actor.user_id),
            description: format!("Asset {} registered", asset.asset_tag),
            details_json: serde_json::json!({ "category": asset.category }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(asset_id = asset.id, tag = %asset.asset_tag, "Asset registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// PUT /api/v1/assets/{id}
///
/// Update descriptive fields. Rejects stale row versions with 409.
pub async fn update_asset(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssetRequest>,
) -> AppResult<impl IntoResponse> {
    // Distinguish "gone" from "stale" before the conditional update.
    load_asset(&state.pool, id).await?;

    let mut tx = state.pool.begin().await?;
    let updated = AssetRepo::update(&mut tx, id, &input.fields, input.row_version)
        .await?
        .ok_or_else(stale_version)?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_UPDATE.to_string(),
            entity_type: entity_types::ASSET.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Asset {} updated", updated.asset_tag),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/assets/{id}
///
/// Remove an asset record. Asset managers only.
pub async fn delete_asset(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = load_asset(&state.pool, id).await?;

    let mut tx = state.pool.begin().await?;
    AssetRepo::delete(&mut tx, id).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_DELETE.to_string(),
            entity_type: entity_types::ASSET.to_string(),
            entity_id: Some(id),
            user_id: Some(actor.user_id),
            description: format!("Asset {} deleted", asset.asset_tag),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{id}/status
///
/// Change asset status through the transition table. Requires a non-empty
/// reason, which lands in the audit trail.
pub async fn change_status(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeStatusRequest>,
) -> AppResult<impl IntoResponse> {
    asset_status::validate_status(&input.new_status)?;
    asset_status::validate_reason(&input.reason)?;
    let asset = load_asset(&state.pool, id).await?;
    asset_status::validate_transition(&asset.status, &input.new_status)?;

    let mut tx = state.pool.begin().await?;
    let updated = AssetRepo::set_status(&mut tx, id, &input.new_status, input.row_version)
        .await?
        .ok_or_else(stale_version)?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::STATUS_CHANGE.to_string(),
            entity_type: entity_types::ASSET.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Asset {} status {} -> {}",
                updated.asset_tag, asset.status, updated.status
            ),
            details_json: serde_json::json!({ "reason": input.reason }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        asset_id = updated.id,
        from = %asset.status,
        to = %updated.status,
        "Asset status changed"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/assets/{id}/move
///
/// Move the asset to a new location and/or holder, recording the movement.
/// A move whose target location and assignee both equal the current values
/// is a no-op: nothing is written and the result reports `changed: false`.
pub async fn move_asset(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveAssetRequest>,
) -> AppResult<impl IntoResponse> {
    asset_status::validate_reason(&input.reason)?;
    let asset = load_asset(&state.pool, id).await?;
    if asset.row_version != input.row_version {
        return Err(stale_version());
    }

    if input.new_location_id == asset.location_id && input.new_user_id == asset.assigned_to {
        return Ok(Json(DataResponse {
            data: MoveAssetResult {
                changed: false,
                message: format!(
                    "Asset {} is already at the requested placement; no changes",
                    asset.asset_tag
                ),
                asset,
            },
        }));
    }

    let mv = MoveAsset {
        new_location_id: input.new_location_id,
        new_user_id: input.new_user_id,
        reason: input.reason.clone(),
    };
    let mut tx = state.pool.begin().await?;
    let moved = AssetRepo::move_asset(&mut tx, &asset, &mv, actor.user_id)
        .await?
        .ok_or_else(stale_version)?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::MOVEMENT.to_string(),
            entity_type: entity_types::ASSET.to_string(),
            entity_id: Some(moved.id),
            user_id: Some(actor.user_id),
            description: format!("Asset {} moved", moved.asset_tag),
            details_json: serde_json::json!({
                "to_location_id": input.new_location_id,
                "to_user_id": input.new_user_id,
                "reason": input.reason,
            }),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: MoveAssetResult {
            changed: true,
            message: format!("Asset {} moved", moved.asset_tag),
            asset: moved,
        },
    }))
}

/// POST /api/v1/assets/{id}/assign
///
/// Assign the asset to a user.
pub async fn assign_asset(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignAssetRequest>,
) -> AppResult<impl IntoResponse> {
    load_asset(&state.pool, id).await?;

    let mut tx = state.pool.begin().await?;
    let updated = AssetRepo::set_assignment(&mut tx, id, Some(input.user_id), input.row_version)
        .await?
        .ok_or_else(stale_version)?;
    record_assignment(&mut tx, &updated, actor.user_id, Some(input.user_id)).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/assets/{id}/unassign
pub async fn unassign_asset(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UnassignAssetRequest>,
) -> AppResult<impl IntoResponse> {
    load_asset(&state.pool, id).await?;

    let mut tx = state.pool.begin().await?;
    let updated = AssetRepo::set_assignment(&mut tx, id, None, input.row_version)
        .await?
        .ok_or_else(stale_version)?;
    record_assignment(&mut tx, &updated, actor.user_id, None).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/assets/{id}/movements
pub async fn list_movements(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_asset(&state.pool, id).await?;
    let movements = AssetRepo::list_movements(&state.pool, id).await?;
    Ok(Json(DataResponse { data: movements }))
}

async fn record_assignment(
    conn: &mut sqlx::PgConnection,
    asset: &Asset,
    actor_id: DbId,
    assigned_to: Option<DbId>,
) -> AppResult<()> {
    AuditLogRepo::insert(
        conn,
        &CreateAuditLog {
            action_type: action_types::ASSIGNMENT.to_string(),
            entity_type: entity_types::ASSET.to_string(),
            entity_id: Some(asset.id),
            user_id: Some(actor_id),
            description: match assigned_to {
                Some(user_id) => format!("Asset {} assigned to user {user_id}", asset.asset_tag),
                None => format!("Asset {} unassigned", asset.asset_tag),
            },
            details_json: serde_json::json!({ "assigned_to": assigned_to }),
        },
    )
    .await?;
    Ok(())
}
