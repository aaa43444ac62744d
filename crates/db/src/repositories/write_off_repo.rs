//! Repository for the `write_off_records` table.

use sqlx::{PgConnection, PgPool};
use wardtrack_core::types::DbId;

use crate::models::write_off::{CreateWriteOff, UpdateWriteOff, WriteOffRecord};

/// Column list for `write_off_records` queries.
const COLUMNS: &str = "\
    id, asset_id, reason, method, status, requested_by, approved_by, \
    created_at, updated_at";

/// Provides CRUD and approval operations for write-off records.
pub struct WriteOffRepo;

impl WriteOffRepo {
    /// Find a write-off record by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WriteOffRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM write_off_records WHERE id = $1");
        sqlx::query_as::<_, WriteOffRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a record inside an open transaction, locking the row.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<WriteOffRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM write_off_records WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, WriteOffRecord>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List all records, newest first. Optional status filter.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<WriteOffRecord>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM write_off_records \
                     WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, WriteOffRecord>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM write_off_records ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, WriteOffRecord>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// List records tied to one asset, oldest first.
    pub async fn list_for_asset(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<Vec<WriteOffRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM write_off_records WHERE asset_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, WriteOffRecord>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }

    /// Draft a new write-off record.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateWriteOff,
        requested_by: DbId,
    ) -> Result<WriteOffRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO write_off_records (asset_id, reason, method, requested_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WriteOffRecord>(&query)
            .bind(input.asset_id)
            .bind(&input.reason)
            .bind(&input.method)
            .bind(requested_by)
            .fetch_one(conn)
            .await
    }

    /// Edit a record while it is still mutable. The caller checks the
    /// status first.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateWriteOff,
    ) -> Result<Option<WriteOffRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE write_off_records SET \
             reason = COALESCE($2, reason), \
             method = COALESCE($3, method), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WriteOffRecord>(&query)
            .bind(id)
            .bind(input.reason.as_deref())
            .bind(input.method.as_deref())
            .fetch_optional(conn)
            .await
    }

    /// Set the record status and, for approvals/rejections, the approver.
    ///
    /// The caller validates the transition first.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        new_status: &str,
        approved_by: Option<DbId>,
    ) -> Result<Option<WriteOffRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE write_off_records SET status = $2, \
             approved_by = COALESCE($3, approved_by), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WriteOffRecord>(&query)
            .bind(id)
            .bind(new_status)
            .bind(approved_by)
            .fetch_optional(conn)
            .await
    }
}
