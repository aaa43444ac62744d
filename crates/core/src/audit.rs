//! Audit logging constants and utility functions.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future worker or CLI tooling. Every
//! mutating service call appends exactly one audit entry; the entries are
//! append-only and hash-chained so tampering is detectable.

use crate::hashing;

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit log entries.
pub mod action_types {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const ENTITY_CREATE: &str = "entity_create";
    pub const ENTITY_UPDATE: &str = "entity_update";
    pub const ENTITY_DELETE: &str = "entity_delete";
    pub const STATUS_CHANGE: &str = "status_change";
    pub const ASSIGNMENT: &str = "assignment";
    pub const MOVEMENT: &str = "movement";
    pub const STOCK_MOVEMENT: &str = "stock_movement";
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
    pub const WORKFLOW_STEP: &str = "workflow_step";
    pub const ERROR: &str = "error";
}

// ---------------------------------------------------------------------------
// Entity type constants
// ---------------------------------------------------------------------------

/// Known entity types referenced by audit entries.
pub mod entity_types {
    pub const ASSET: &str = "asset";
    pub const INVENTORY_ITEM: &str = "inventory_item";
    pub const IT_REQUEST: &str = "it_request";
    pub const PROCUREMENT_REQUEST: &str = "procurement_request";
    pub const WRITE_OFF_RECORD: &str = "write_off_record";
    pub const USER: &str = "user";
    pub const VENDOR: &str = "vendor";
    pub const LOCATION: &str = "location";
}

// ---------------------------------------------------------------------------
// Integrity hash computation
// ---------------------------------------------------------------------------

/// Known seed value for the first entry in the hash chain.
const CHAIN_SEED: &str = "AUDIT_LOG_CHAIN_SEED_V1";

/// Compute the SHA-256 integrity hash for an audit log entry.
///
/// `prev_hash` is the integrity hash of the previous entry, or `None` for the
/// first entry in the chain (which uses a known seed value).
///
/// `entry_data` is a canonical string representation of the entry's content
/// (typically the JSON-serialized entry fields).
pub fn compute_integrity_hash(prev_hash: Option<&str>, entry_data: &str) -> String {
    let prev = prev_hash.unwrap_or(CHAIN_SEED);
    let combined = format!("{prev}|{entry_data}");
    hashing::sha256_hex(combined.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
