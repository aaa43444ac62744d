//! User account models.

use serde::Serialize;
use sqlx::FromRow;
use wardtrack_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// The password hash is deliberately not serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    /// One of the role constants in `wardtrack_core::roles`.
    pub role: String,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
