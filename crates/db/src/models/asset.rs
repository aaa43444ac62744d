//! Asset and asset-movement models and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub asset_tag: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// One of the status constants in `wardtrack_core::asset_status`.
    pub status: String,
    pub location_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub warranty_expiry: Option<chrono::NaiveDate>,
    pub purchase_price: Option<Decimal>,
    /// Optimistic concurrency token; bumped on every update.
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `asset_movements` history table.
///
/// Append-only; one row per physical move or reassignment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetMovement {
    pub id: DbId,
    pub asset_id: DbId,
    pub from_location_id: Option<DbId>,
    pub to_location_id: Option<DbId>,
    pub from_user_id: Option<DbId>,
    pub to_user_id: Option<DbId>,
    pub reason: String,
    pub moved_by: DbId,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for registering a new asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub asset_tag: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location_id: Option<DbId>,
    pub warranty_expiry: Option<chrono::NaiveDate>,
    pub purchase_price: Option<Decimal>,
}

/// DTO for updating descriptive asset fields. Status, location, and
/// assignment changes go through their dedicated transition endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAsset {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub warranty_expiry: Option<chrono::NaiveDate>,
    pub purchase_price: Option<Decimal>,
}

/// Query parameters for searching/listing assets.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSearchParams {
    /// Filter by tag or model (ILIKE).
    pub q: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub location_id: Option<DbId>,
    /// Maximum results (default 50, max 200).
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Parameters for a location/assignment move, recorded in `asset_movements`.
#[derive(Debug, Clone)]
pub struct MoveAsset {
    pub new_location_id: Option<DbId>,
    pub new_user_id: Option<DbId>,
    pub reason: String,
}
