//! Handlers for the `/procurement` resource.
//!
//! Drafts are editable; once submitted for approval the header and lines
//! freeze except through the status transitions. Receiving a procurement
//! stocks in every line that references an inventory item.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::inventory;
use wardtrack_core::procurement_status;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::procurement::{
    CreateProcurement, ProcurementItemInput, ProcurementRequest, ProcurementSearchParams,
    UpdateProcurement,
};
use wardtrack_db::repositories::{AuditLogRepo, InventoryRepo, ProcurementRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{
    RequireAssetManager, RequireAuth, RequireItSupport, RequireWarehouse,
};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `POST /procurement/{id}/items`.
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<ProcurementItemInput>,
}

/// Body for the approval/rejection transitions.
#[derive(Debug, Deserialize, Default)]
pub struct DecisionRequest {
    pub comments: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Procurement request",
        id,
    })
}

async fn load(pool: &sqlx::PgPool, id: DbId) -> AppResult<ProcurementRequest> {
    ProcurementRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn validate_items(items: &[ProcurementItemInput]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one line item is required".into(),
        )));
    }
    for item in items {
        if item.item_name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Line item name must not be empty".into(),
            )));
        }
        if item.quantity <= 0 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Line item '{}' has non-positive quantity",
                item.item_name
            ))));
        }
        if item.unit_price < rust_decimal::Decimal::ZERO {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Line item '{}' has a negative unit price",
                item.item_name
            ))));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/procurement
pub async fn list_procurements(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ProcurementSearchParams>,
) -> AppResult<impl IntoResponse> {
    let procurements = ProcurementRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: procurements }))
}

/// GET /api/v1/procurement/{id}
pub async fn get_procurement(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let procurement = load(&state.pool, id).await?;
    Ok(Json(DataResponse { data: procurement }))
}

/// GET /api/v1/procurement/{id}/items
pub async fn list_items(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load(&state.pool, id).await?;
    let items = ProcurementRepo::list_items(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/procurement
///
/// Create a draft procurement request with its line items.
pub async fn create_procurement(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Json(input): Json<CreateProcurement>,
) -> AppResult<impl IntoResponse> {
    validate_items(&input.items)?;

    let mut tx = state.pool.begin().await?;
    let procurement = ProcurementRepo::create_with_items(&mut tx, &input, actor.user_id).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::PROCUREMENT_REQUEST.to_string(),
            entity_id: Some(procurement.id),
            user_id: Some(actor.user_id),
            description: format!("Procurement {} drafted", procurement.request_number),
            details_json: serde_json::json!({
                "estimated_budget": procurement.estimated_budget,
                "items": input.items.len(),
            }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        procurement_id = procurement.id,
        number = %procurement.request_number,
        "Procurement drafted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: procurement })))
}

/// PUT /api/v1/procurement/{id}
///
/// Edit the header. Only while still editable (draft or pending approval).
pub async fn update_procurement(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProcurement>,
) -> AppResult<impl IntoResponse> {
    let procurement = load(&state.pool, id).await?;
    procurement_status::validate_editable(&procurement.status)?;

    let mut tx = state.pool.begin().await?;
    let updated = ProcurementRepo::update_header(&mut tx, id, input.vendor_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_UPDATE.to_string(),
            entity_type: entity_types::PROCUREMENT_REQUEST.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Procurement {} updated", updated.request_number),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/procurement/{id}/items
///
/// Append line items to an editable request; the budget is recomputed.
pub async fn add_items(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddItemsRequest>,
) -> AppResult<impl IntoResponse> {
    validate_items(&input.items)?;
    let procurement = load(&state.pool, id).await?;
    procurement_status::validate_editable(&procurement.status)?;

    let mut tx = state.pool.begin().await?;
    let updated = ProcurementRepo::add_items(&mut tx, id, &input.items).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_UPDATE.to_string(),
            entity_type: entity_types::PROCUREMENT_REQUEST.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Procurement {} extended with {} item(s)",
                updated.request_number,
                input.items.len()
            ),
            details_json: serde_json::json!({ "estimated_budget": updated.estimated_budget }),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/procurement/{id}/submit
///
/// Draft -> pending approval.
pub async fn submit(
    RequireItSupport(actor): RequireItSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(
        &state,
        id,
        procurement_status::STATUS_PENDING_APPROVAL,
        None,
        &actor,
        action_types::STATUS_CHANGE,
    )
    .await
}

/// POST /api/v1/procurement/{id}/approve
///
/// Pending approval -> approved. Asset managers only.
pub async fn approve(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(
        &state,
        id,
        procurement_status::STATUS_APPROVED,
        input.comments.as_deref(),
        &actor,
        action_types::APPROVE,
    )
    .await
}

/// POST /api/v1/procurement/{id}/order
///
/// Approved -> ordered.
pub async fn order(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(
        &state,
        id,
        procurement_status::STATUS_ORDERED,
        None,
        &actor,
        action_types::STATUS_CHANGE,
    )
    .await
}

/// POST /api/v1/procurement/{id}/receive
///
/// Ordered -> received. Stocks in every line item that references an
/// inventory item, in the same transaction. Warehouse only.
pub async fn receive(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let procurement = load(&state.pool, id).await?;
    procurement_status::validate_transition(
        &procurement.status,
        procurement_status::STATUS_RECEIVED,
    )?;

    let mut tx = state.pool.begin().await?;
    let updated =
        ProcurementRepo::set_status(&mut tx, id, procurement_status::STATUS_RECEIVED, None, None)
            .await?
            .ok_or_else(|| not_found(id))?;

    let items = ProcurementRepo::list_items_tx(&mut tx, id).await?;
    let mut stocked_in = 0;
    for item in &items {
        let Some(inventory_item_id) = item.inventory_item_id else {
            continue;
        };
        InventoryRepo::apply_movement(
            &mut tx,
            inventory_item_id,
            inventory::MOVEMENT_STOCK_IN,
            item.quantity,
            None,
            actor.user_id,
            Some(&format!("Received via {}", updated.request_number)),
        )
        .await?;
        stocked_in += 1;
    }

    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::STATUS_CHANGE.to_string(),
            entity_type: entity_types::PROCUREMENT_REQUEST.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Procurement {} received", updated.request_number),
            details_json: serde_json::json!({ "stocked_in_lines": stocked_in }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        procurement_id = updated.id,
        stocked_in_lines = stocked_in,
        "Procurement received"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/procurement/{id}/cancel
pub async fn cancel(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(
        &state,
        id,
        procurement_status::STATUS_CANCELLED,
        input.comments.as_deref(),
        &actor,
        action_types::REJECT,
    )
    .await
}

async fn transition(
    state: &AppState,
    id: DbId,
    new_status: &str,
    comments: Option<&str>,
    actor: &AuthUser,
    action_type: &str,
) -> AppResult<Json<DataResponse<ProcurementRequest>>> {
    let procurement = load(&state.pool, id).await?;
    procurement_status::validate_transition(&procurement.status, new_status)?;

    let approved_by = if new_status == procurement_status::STATUS_APPROVED {
        Some(actor.user_id)
    } else {
        None
    };

    let mut tx = state.pool.begin().await?;
    let updated = ProcurementRepo::set_status(&mut tx, id, new_status, approved_by, comments)
        .await?
        .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_type.to_string(),
            entity_type: entity_types::PROCUREMENT_REQUEST.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Procurement {} status {} -> {}",
                updated.request_number, procurement.status, updated.status
            ),
            details_json: serde_json::json!({ "comments": comments }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        procurement_id = updated.id,
        from = %procurement.status,
        to = %updated.status,
        "Procurement status changed"
    );

    Ok(Json(DataResponse { data: updated }))
}
