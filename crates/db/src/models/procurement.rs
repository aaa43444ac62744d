//! Procurement request and line-item models and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `procurement_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcurementRequest {
    pub id: DbId,
    /// System-generated, unique, e.g. `PR-2026-00007`.
    pub request_number: String,
    /// One of the status constants in `wardtrack_core::procurement_status`.
    pub status: String,
    /// The IT request that caused this procurement, if any.
    pub originating_request_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    /// Always recomputed from the line items before persistence.
    pub estimated_budget: Decimal,
    pub approved_by: Option<DbId>,
    pub approval_comments: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `procurement_items` table, ordered by `position`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcurementItem {
    pub id: DbId,
    pub procurement_request_id: DbId,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    /// Inventory item restocked when this line is received.
    pub inventory_item_id: Option<DbId>,
    pub position: i32,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// One line item in a create/append payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcurementItemInput {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub inventory_item_id: Option<DbId>,
}

/// DTO for creating a procurement request (starts in draft).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProcurement {
    pub vendor_id: Option<DbId>,
    pub originating_request_id: Option<DbId>,
    pub items: Vec<ProcurementItemInput>,
}

/// DTO for editing the header while the request is still editable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProcurement {
    pub vendor_id: Option<DbId>,
}

/// Query parameters for listing procurement requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcurementSearchParams {
    pub status: Option<String>,
    pub originating_request_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
