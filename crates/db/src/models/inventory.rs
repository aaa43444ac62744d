//! Inventory item and stock-movement models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `inventory_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryItem {
    pub id: DbId,
    pub item_code: String,
    pub name: String,
    /// Current stock level. Never negative (CHECK constraint + service guard).
    pub quantity: i64,
    pub minimum_level: i64,
    pub status: String,
    pub condition: String,
    pub location_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `inventory_movements` ledger.
///
/// Append-only; one row per stock change (stock-in, stock-out, deploy,
/// transfer).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryMovement {
    pub id: DbId,
    pub inventory_item_id: DbId,
    /// One of the movement type constants in `wardtrack_core::inventory`.
    pub movement_type: String,
    pub quantity: i64,
    /// Set for deploy movements: the asset the stock went into.
    pub asset_id: Option<DbId>,
    pub actor_id: DbId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an inventory item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventoryItem {
    pub item_code: String,
    pub name: String,
    pub quantity: Option<i64>,
    pub minimum_level: Option<i64>,
    pub condition: Option<String>,
    pub location_id: Option<DbId>,
}

/// DTO for updating descriptive fields. Quantity only changes through
/// movements.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInventoryItem {
    pub name: Option<String>,
    pub minimum_level: Option<i64>,
    pub condition: Option<String>,
    pub location_id: Option<DbId>,
}

/// DTO for a stock movement request.
#[derive(Debug, Clone, Deserialize)]
pub struct StockMovementInput {
    pub quantity: i64,
    /// Required for deploy movements: the target asset.
    pub asset_id: Option<DbId>,
    pub notes: Option<String>,
}
