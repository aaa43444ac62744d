//! Repository for the `it_requests` and `request_activities` tables.

use chrono::Datelike;
use sqlx::{PgConnection, PgPool};
use wardtrack_core::naming;
use wardtrack_core::types::DbId;

use crate::models::request::{CreateRequest, ItRequest, RequestActivity, RequestSearchParams};

/// Column list for `it_requests` queries.
const COLUMNS: &str = "\
    id, request_number, request_type, priority, status, title, description, \
    requested_by, assigned_to, damaged_asset_id, related_asset_id, \
    required_inventory_item_id, temporary_asset_id, request_date, \
    required_by_date, row_version, created_at, updated_at";

/// Column list for `request_activities` queries.
const ACTIVITY_COLUMNS: &str = "\
    id, request_id, status, actor_id, comments, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Provides CRUD and transition operations for IT requests.
pub struct RequestRepo;

impl RequestRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a request by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM it_requests WHERE id = $1");
        sqlx::query_as::<_, ItRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a request by ID inside an open transaction, locking the row.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ItRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM it_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ItRequest>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a request by its human-facing number.
    pub async fn find_by_number(
        pool: &PgPool,
        request_number: &str,
    ) -> Result<Option<ItRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM it_requests WHERE request_number = $1");
        sqlx::query_as::<_, ItRequest>(&query)
            .bind(request_number)
            .fetch_optional(pool)
            .await
    }

    /// List requests with optional filters, newest first.
    pub async fn search(
        pool: &PgPool,
        params: &RequestSearchParams,
    ) -> Result<Vec<ItRequest>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_index = 0u32;

        if params.status.is_some() {
            bind_index += 1;
            conditions.push(format!("status = ${bind_index}"));
        }
        if params.priority.is_some() {
            bind_index += 1;
            conditions.push(format!("priority = ${bind_index}"));
        }
        if params.assigned_to.is_some() {
            bind_index += 1;
            conditions.push(format!("assigned_to = ${bind_index}"));
        }
        if params.requested_by.is_some() {
            bind_index += 1;
            conditions.push(format!("requested_by = ${bind_index}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_param = bind_index + 1;
        let offset_param = bind_index + 2;
        let query = format!(
            "SELECT {COLUMNS} FROM it_requests {where_clause} \
             ORDER BY created_at DESC LIMIT ${limit_param} OFFSET ${offset_param}"
        );

        let mut q = sqlx::query_as::<_, ItRequest>(&query);
        if let Some(status) = &params.status {
            q = q.bind(status);
        }
        if let Some(priority) = &params.priority {
            q = q.bind(priority);
        }
        if let Some(assigned_to) = params.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(requested_by) = params.requested_by {
            q = q.bind(requested_by);
        }
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// List the activity trail for a request, oldest first.
    pub async fn list_activities(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<RequestActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM request_activities \
             WHERE request_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, RequestActivity>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Mutations (transaction scoped)
    // -----------------------------------------------------------------------

    /// Submit a new request, generating its per-year request number.
    ///
    /// The sequence is count-within-year + 1; the unique constraint on
    /// `request_number` turns a concurrent collision into a 23505 the caller
    /// surfaces as a conflict.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateRequest,
        requested_by: DbId,
    ) -> Result<ItRequest, sqlx::Error> {
        let year = chrono::Utc::now().year();
        let prefix = format!("{}-{year}-%", naming::REQUEST_PREFIX);
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM it_requests WHERE request_number LIKE $1")
                .bind(&prefix)
                .fetch_one(&mut *conn)
                .await?;
        let request_number = naming::format_request_number(year, count.0 + 1);

        let query = format!(
            "INSERT INTO it_requests \
             (request_number, request_type, priority, title, description, \
              requested_by, damaged_asset_id, related_asset_id, \
              required_inventory_item_id, required_by_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, ItRequest>(&query)
            .bind(&request_number)
            .bind(&input.request_type)
            .bind(&input.priority)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(requested_by)
            .bind(input.damaged_asset_id)
            .bind(input.related_asset_id)
            .bind(input.required_inventory_item_id)
            .bind(input.required_by_date)
            .fetch_one(&mut *conn)
            .await?;

        Self::append_activity(conn, request.id, &request.status, requested_by, None).await?;
        Ok(request)
    }

    /// Set the request status, bumping the row version and appending an
    /// activity row.
    ///
    /// The caller validates the transition first. Returns `None` when
    /// `expected_version` is stale or the row is gone.
    pub async fn set_status_with_activity(
        conn: &mut PgConnection,
        id: DbId,
        new_status: &str,
        actor_id: DbId,
        comments: Option<&str>,
        expected_version: i64,
    ) -> Result<Option<ItRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE it_requests SET status = $3, row_version = row_version + 1, \
             updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ItRequest>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(new_status)
            .fetch_optional(&mut *conn)
            .await?;

        let Some(updated) = updated else {
            return Ok(None);
        };
        Self::append_activity(conn, id, new_status, actor_id, comments).await?;
        Ok(Some(updated))
    }

    /// Set the handler assignment, bumping the row version.
    pub async fn set_assignment(
        conn: &mut PgConnection,
        id: DbId,
        assigned_to: Option<DbId>,
        expected_version: i64,
    ) -> Result<Option<ItRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE it_requests SET assigned_to = $3, row_version = row_version + 1, \
             updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItRequest>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(assigned_to)
            .fetch_optional(conn)
            .await
    }

    /// Set or clear the temporary replacement asset link.
    pub async fn set_temporary_asset(
        conn: &mut PgConnection,
        id: DbId,
        temporary_asset_id: Option<DbId>,
        expected_version: i64,
    ) -> Result<Option<ItRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE it_requests SET temporary_asset_id = $3, \
             row_version = row_version + 1, updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItRequest>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(temporary_asset_id)
            .fetch_optional(conn)
            .await
    }

    async fn append_activity(
        conn: &mut PgConnection,
        request_id: DbId,
        status: &str,
        actor_id: DbId,
        comments: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO request_activities (request_id, status, actor_id, comments) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(request_id)
        .bind(status)
        .bind(actor_id)
        .bind(comments)
        .execute(conn)
        .await?;
        Ok(())
    }
}
