//! Repository for the `vendors` table.

use sqlx::PgPool;
use wardtrack_core::types::DbId;

use crate::models::vendor::{CreateVendor, Vendor};

/// Column list for `vendors` queries.
const COLUMNS: &str = "\
    id, name, contact_name, contact_email, phone, is_active, created_at, updated_at";

/// Provides CRUD operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    /// Create a new vendor.
    pub async fn create(pool: &PgPool, input: &CreateVendor) -> Result<Vendor, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendors (name, contact_name, contact_email, phone) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(&input.name)
            .bind(input.contact_name.as_deref())
            .bind(input.contact_email.as_deref())
            .bind(input.phone.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a vendor by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active vendors ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE is_active ORDER BY name");
        sqlx::query_as::<_, Vendor>(&query).fetch_all(pool).await
    }

    /// Soft-deactivate a vendor. Returns true if a row changed.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE vendors SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
