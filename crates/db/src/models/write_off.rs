//! Write-off record models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

/// A row from the `write_off_records` table. Tied to exactly one asset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WriteOffRecord {
    pub id: DbId,
    pub asset_id: DbId,
    pub reason: String,
    /// One of the method constants in `wardtrack_core::write_off_status`.
    pub method: String,
    /// One of the status constants in `wardtrack_core::write_off_status`.
    pub status: String,
    pub requested_by: DbId,
    pub approved_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for drafting a write-off record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWriteOff {
    pub asset_id: DbId,
    pub reason: String,
    pub method: String,
}

/// DTO for editing a draft record.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWriteOff {
    pub reason: Option<String>,
    pub method: Option<String>,
}
