//! Repository for the `procurement_requests` and `procurement_items` tables.

use chrono::Datelike;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use wardtrack_core::naming;
use wardtrack_core::types::DbId;

use crate::models::procurement::{
    CreateProcurement, ProcurementItem, ProcurementItemInput, ProcurementRequest,
    ProcurementSearchParams,
};

/// Column list for `procurement_requests` queries.
const COLUMNS: &str = "\
    id, request_number, status, originating_request_id, vendor_id, \
    estimated_budget, approved_by, approval_comments, created_by, \
    created_at, updated_at";

/// Column list for `procurement_items` queries.
const ITEM_COLUMNS: &str = "\
    id, procurement_request_id, item_name, quantity, unit_price, \
    inventory_item_id, position, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Provides CRUD and transition operations for procurement requests.
pub struct ProcurementRepo;

impl ProcurementRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a procurement request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProcurementRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM procurement_requests WHERE id = $1");
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a procurement request inside an open transaction, locking it.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ProcurementRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM procurement_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List procurement requests with optional filters, newest first.
    pub async fn search(
        pool: &PgPool,
        params: &ProcurementSearchParams,
    ) -> Result<Vec<ProcurementRequest>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_index = 0u32;

        if params.status.is_some() {
            bind_index += 1;
            conditions.push(format!("status = ${bind_index}"));
        }
        if params.originating_request_id.is_some() {
            bind_index += 1;
            conditions.push(format!("originating_request_id = ${bind_index}"));
        }
        if params.vendor_id.is_some() {
            bind_index += 1;
            conditions.push(format!("vendor_id = ${bind_index}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_param = bind_index + 1;
        let offset_param = bind_index + 2;
        let query = format!(
            "SELECT {COLUMNS} FROM procurement_requests {where_clause} \
             ORDER BY created_at DESC LIMIT ${limit_param} OFFSET ${offset_param}"
        );

        let mut q = sqlx::query_as::<_, ProcurementRequest>(&query);
        if let Some(status) = &params.status {
            q = q.bind(status);
        }
        if let Some(originating) = params.originating_request_id {
            q = q.bind(originating);
        }
        if let Some(vendor_id) = params.vendor_id {
            q = q.bind(vendor_id);
        }
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// List all procurement requests spawned by an IT request.
    pub async fn list_by_originating_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<ProcurementRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM procurement_requests \
             WHERE originating_request_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// Same as [`Self::list_by_originating_request`], inside a transaction.
    pub async fn list_by_originating_request_tx(
        conn: &mut PgConnection,
        request_id: DbId,
    ) -> Result<Vec<ProcurementRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM procurement_requests \
             WHERE originating_request_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(request_id)
            .fetch_all(conn)
            .await
    }

    /// List line items for a procurement request, in position order.
    pub async fn list_items(
        pool: &PgPool,
        procurement_request_id: DbId,
    ) -> Result<Vec<ProcurementItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM procurement_items \
             WHERE procurement_request_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, ProcurementItem>(&query)
            .bind(procurement_request_id)
            .fetch_all(pool)
            .await
    }

    /// Same as [`Self::list_items`], inside a transaction.
    pub async fn list_items_tx(
        conn: &mut PgConnection,
        procurement_request_id: DbId,
    ) -> Result<Vec<ProcurementItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM procurement_items \
             WHERE procurement_request_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, ProcurementItem>(&query)
            .bind(procurement_request_id)
            .fetch_all(conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Mutations (transaction scoped)
    // -----------------------------------------------------------------------

    /// Create a procurement request in draft, with its line items.
    ///
    /// The budget is always recomputed from the items, never taken from the
    /// payload. The request number is per-year, like IT request numbers.
    pub async fn create_with_items(
        conn: &mut PgConnection,
        input: &CreateProcurement,
        created_by: DbId,
    ) -> Result<ProcurementRequest, sqlx::Error> {
        let year = chrono::Utc::now().year();
        let prefix = format!("{}-{year}-%", naming::PROCUREMENT_PREFIX);
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM procurement_requests WHERE request_number LIKE $1",
        )
        .bind(&prefix)
        .fetch_one(&mut *conn)
        .await?;
        let request_number = naming::format_procurement_number(year, count.0 + 1);

        let budget = Self::items_total(&input.items);
        let query = format!(
            "INSERT INTO procurement_requests \
             (request_number, originating_request_id, vendor_id, \
              estimated_budget, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(&request_number)
            .bind(input.originating_request_id)
            .bind(input.vendor_id)
            .bind(budget)
            .bind(created_by)
            .fetch_one(&mut *conn)
            .await?;

        Self::insert_items(conn, request.id, &input.items, 0).await?;
        Ok(request)
    }

    /// Append line items to an editable request, recomputing the budget.
    ///
    /// The caller checks editability first. Returns the updated request.
    pub async fn add_items(
        conn: &mut PgConnection,
        procurement_request_id: DbId,
        items: &[ProcurementItemInput],
    ) -> Result<ProcurementRequest, sqlx::Error> {
        let next_position: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM procurement_items \
             WHERE procurement_request_id = $1",
        )
        .bind(procurement_request_id)
        .fetch_one(&mut *conn)
        .await?;

        Self::insert_items(conn, procurement_request_id, items, next_position.0).await?;
        Self::recompute_budget(conn, procurement_request_id).await
    }

    /// Set the procurement status and optional approval fields.
    ///
    /// The caller validates the transition first.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        new_status: &str,
        approved_by: Option<DbId>,
        approval_comments: Option<&str>,
    ) -> Result<Option<ProcurementRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE procurement_requests SET status = $2, \
             approved_by = COALESCE($3, approved_by), \
             approval_comments = COALESCE($4, approval_comments), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(id)
            .bind(new_status)
            .bind(approved_by)
            .bind(approval_comments)
            .fetch_optional(conn)
            .await
    }

    /// Update the header while the request is still editable.
    pub async fn update_header(
        conn: &mut PgConnection,
        id: DbId,
        vendor_id: Option<DbId>,
    ) -> Result<Option<ProcurementRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE procurement_requests SET \
             vendor_id = COALESCE($2, vendor_id), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(id)
            .bind(vendor_id)
            .fetch_optional(conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn items_total(items: &[ProcurementItemInput]) -> Decimal {
        items
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum()
    }

    async fn insert_items(
        conn: &mut PgConnection,
        procurement_request_id: DbId,
        items: &[ProcurementItemInput],
        start_position: i32,
    ) -> Result<(), sqlx::Error> {
        for (offset, item) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO procurement_items \
                 (procurement_request_id, item_name, quantity, unit_price, \
                  inventory_item_id, position) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(procurement_request_id)
            .bind(&item.item_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.inventory_item_id)
            .bind(start_position + offset as i32)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn recompute_budget(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<ProcurementRequest, sqlx::Error> {
        let query = format!(
            "UPDATE procurement_requests SET estimated_budget = ( \
               SELECT COALESCE(SUM(quantity * unit_price), 0) \
               FROM procurement_items WHERE procurement_request_id = $1 \
             ), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcurementRequest>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }
}
