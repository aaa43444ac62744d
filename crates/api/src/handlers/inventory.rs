//! Handlers for the `/inventory` resource: item CRUD and stock movements.
//!
//! Quantity only ever changes through the movement endpoints, which pair the
//! new level with a ledger row in one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::inventory;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::inventory::{
    CreateInventoryItem, InventoryItem, StockMovementInput, UpdateInventoryItem,
};
use wardtrack_db::repositories::{AuditLogRepo, InventoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireWarehouse};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Inventory item",
        id,
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/inventory
pub async fn list_items(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = InventoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/inventory/low-stock
///
/// Items at or below their minimum stock level.
pub async fn list_low_stock(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = InventoryRepo::list_low_stock(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/inventory/{id}
pub async fn get_item(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = InventoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/inventory
pub async fn create_item(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Json(input): Json<CreateInventoryItem>,
) -> AppResult<impl IntoResponse> {
    if input.item_code.trim().is_empty() || input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Item code and name must not be empty".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    let item = InventoryRepo::create(&mut tx, &input).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::INVENTORY_ITEM.to_string(),
            entity_id: Some(item.id),
            user_id: Some(actor.user_id),
            description: format!("Inventory item {} created", item.item_code),
            details_json: serde_json::json!({ "quantity": item.quantity }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(item_id = item.id, code = %item.item_code, "Inventory item created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/inventory/{id}
pub async fn update_item(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInventoryItem>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let updated = InventoryRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_UPDATE.to_string(),
            entity_type: entity_types::INVENTORY_ITEM.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!("Inventory item {} updated", updated.item_code),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/inventory/{id}
pub async fn delete_item(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = InventoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut tx = state.pool.begin().await?;
    InventoryRepo::delete(&mut tx, id).await?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::ENTITY_DELETE.to_string(),
            entity_type: entity_types::INVENTORY_ITEM.to_string(),
            entity_id: Some(id),
            user_id: Some(actor.user_id),
            description: format!("Inventory item {} deleted", item.item_code),
            details_json: serde_json::json!({}),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Stock movements
// ---------------------------------------------------------------------------

/// POST /api/v1/inventory/{id}/stock-in
pub async fn stock_in(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StockMovementInput>,
) -> AppResult<impl IntoResponse> {
    apply(&state, id, inventory::MOVEMENT_STOCK_IN, &input, &actor).await
}

/// POST /api/v1/inventory/{id}/stock-out
pub async fn stock_out(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StockMovementInput>,
) -> AppResult<impl IntoResponse> {
    apply(&state, id, inventory::MOVEMENT_STOCK_OUT, &input, &actor).await
}

/// POST /api/v1/inventory/{id}/deploy
///
/// Consume stock into a specific asset (`asset_id` is required).
pub async fn deploy(
    RequireWarehouse(actor): RequireWarehouse,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StockMovementInput>,
) -> AppResult<impl IntoResponse> {
    if input.asset_id.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Deploy movements require a target asset_id".into(),
        )));
    }
    apply(&state, id, inventory::MOVEMENT_DEPLOY, &input, &actor).await
}

/// GET /api/v1/inventory/{id}/movements
pub async fn list_movements(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    InventoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let movements = InventoryRepo::list_movements(&state.pool, id).await?;
    Ok(Json(DataResponse { data: movements }))
}

async fn apply(
    state: &AppState,
    id: DbId,
    movement_type: &str,
    input: &StockMovementInput,
    actor: &AuthUser,
) -> AppResult<Json<DataResponse<InventoryItem>>> {
    let mut tx = state.pool.begin().await?;
    let updated = InventoryRepo::apply_movement(
        &mut tx,
        id,
        movement_type,
        input.quantity,
        input.asset_id,
        actor.user_id,
        input.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    AuditLogRepo::insert(
        &mut tx,
        &CreateAuditLog {
            action_type: action_types::STOCK_MOVEMENT.to_string(),
            entity_type: entity_types::INVENTORY_ITEM.to_string(),
            entity_id: Some(updated.id),
            user_id: Some(actor.user_id),
            description: format!(
                "Inventory item {} {movement_type} x{}",
                updated.item_code, input.quantity
            ),
            details_json: serde_json::json!({
                "movement_type": movement_type,
                "quantity": input.quantity,
                "asset_id": input.asset_id,
                "new_level": updated.quantity,
            }),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        item_id = updated.id,
        movement_type,
        quantity = input.quantity,
        new_level = updated.quantity,
        "Stock movement applied"
    );

    Ok(Json(DataResponse { data: updated }))
}
