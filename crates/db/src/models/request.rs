//! IT request and request-activity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `it_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItRequest {
    pub id: DbId,
    /// System-generated, unique, e.g. `REQ-2026-00042`.
    pub request_number: String,
    pub request_type: String,
    pub priority: String,
    /// One of the status constants in `wardtrack_core::request_status`.
    pub status: String,
    pub title: String,
    pub description: Option<String>,
    pub requested_by: DbId,
    pub assigned_to: Option<DbId>,
    /// The asset this repair request is about.
    pub damaged_asset_id: Option<DbId>,
    pub related_asset_id: Option<DbId>,
    pub required_inventory_item_id: Option<DbId>,
    /// Set while a temporary replacement asset covers the damaged one.
    pub temporary_asset_id: Option<DbId>,
    pub request_date: Timestamp,
    pub required_by_date: Option<chrono::NaiveDate>,
    /// Optimistic concurrency token; bumped on every update.
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the append-only `request_activities` table.
///
/// One row per status/assignment change, in insertion order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestActivity {
    pub id: DbId,
    pub request_id: DbId,
    /// Request status after this activity.
    pub status: String,
    pub actor_id: DbId,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for submitting a new IT request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub request_type: String,
    pub priority: String,
    pub title: String,
    pub description: Option<String>,
    pub damaged_asset_id: Option<DbId>,
    pub related_asset_id: Option<DbId>,
    pub required_inventory_item_id: Option<DbId>,
    pub required_by_date: Option<chrono::NaiveDate>,
}

/// Query parameters for listing requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSearchParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
    pub requested_by: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
