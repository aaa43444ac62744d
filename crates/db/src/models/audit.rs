//! Audit log models and query DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

/// A row from the append-only `audit_logs` table.
///
/// Never updated or deleted by business code. Entries are hash-chained via
/// `integrity_hash` (see `wardtrack_core::audit`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    /// One of the action type constants in `wardtrack_core::audit`.
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub description: String,
    pub details_json: serde_json::Value,
    pub integrity_hash: String,
    pub created_at: Timestamp,
}

/// Fields for a new audit entry; hash and timestamp are computed on insert.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub description: String,
    pub details_json: serde_json::Value,
}

/// Query parameters for filtering audit logs.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditQuery {
    pub action_type: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub user_id: Option<DbId>,
    /// Maximum results (default 50, max 500).
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
