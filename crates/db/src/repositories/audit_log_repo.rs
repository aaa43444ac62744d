//! Repository for the append-only `audit_logs` table.
//!
//! Entries are hash-chained: each row's `integrity_hash` covers its own
//! content plus the previous row's hash, so any tampering with history
//! breaks verification from that point on.

use sqlx::{PgConnection, PgPool};
use wardtrack_core::audit;
use wardtrack_core::types::DbId;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list for `audit_logs` queries.
const COLUMNS: &str = "\
    id, action_type, entity_type, entity_id, user_id, description, \
    details_json, integrity_hash, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// Provides append and query operations for the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an audit entry, extending the hash chain.
    ///
    /// Must run inside the same transaction as the change it records, so
    /// the entry and the change commit or roll back together.
    pub async fn insert(
        conn: &mut PgConnection,
        entry: &CreateAuditLog,
    ) -> Result<AuditLog, sqlx::Error> {
        let prev: Option<(String,)> = sqlx::query_as(
            "SELECT integrity_hash FROM audit_logs ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *conn)
        .await?;

        let entry_data = Self::chain_payload(
            &entry.action_type,
            &entry.entity_type,
            entry.entity_id,
            entry.user_id,
            &entry.description,
            &entry.details_json,
        );
        let hash =
            audit::compute_integrity_hash(prev.as_ref().map(|p| p.0.as_str()), &entry_data);

        let query = format!(
            "INSERT INTO audit_logs \
             (action_type, entity_type, entity_id, user_id, description, \
              details_json, integrity_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&entry.action_type)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(entry.user_id)
            .bind(&entry.description)
            .bind(&entry.details_json)
            .bind(&hash)
            .fetch_one(conn)
            .await
    }

    /// Append an audit entry in its own short transaction.
    ///
    /// For reads and auth events that have no surrounding transaction.
    pub async fn record(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let log = Self::insert(&mut tx, entry).await?;
        tx.commit().await?;
        Ok(log)
    }

    /// Query audit entries with optional filters, newest first.
    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_index = 0u32;

        if params.action_type.is_some() {
            bind_index += 1;
            conditions.push(format!("action_type = ${bind_index}"));
        }
        if params.entity_type.is_some() {
            bind_index += 1;
            conditions.push(format!("entity_type = ${bind_index}"));
        }
        if params.entity_id.is_some() {
            bind_index += 1;
            conditions.push(format!("entity_id = ${bind_index}"));
        }
        if params.user_id.is_some() {
            bind_index += 1;
            conditions.push(format!("user_id = ${bind_index}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_param = bind_index + 1;
        let offset_param = bind_index + 2;
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs {where_clause} \
             ORDER BY id DESC LIMIT ${limit_param} OFFSET ${offset_param}"
        );

        let mut q = sqlx::query_as::<_, AuditLog>(&query);
        if let Some(action_type) = &params.action_type {
            q = q.bind(action_type);
        }
        if let Some(entity_type) = &params.entity_type {
            q = q.bind(entity_type);
        }
        if let Some(entity_id) = params.entity_id {
            q = q.bind(entity_id);
        }
        if let Some(user_id) = params.user_id {
            q = q.bind(user_id);
        }
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// List the full trail for one entity, oldest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs \
             WHERE entity_type = $1 AND entity_id = $2 ORDER BY id"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a workflow step with the given label was already recorded
    /// for a request. Used for idempotency checks inside a transaction.
    pub async fn workflow_step_exists(
        conn: &mut PgConnection,
        request_id: DbId,
        label: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM audit_logs \
             WHERE action_type = $1 AND entity_type = $2 AND entity_id = $3 \
             AND description = $4",
        )
        .bind(audit::action_types::WORKFLOW_STEP)
        .bind(audit::entity_types::IT_REQUEST)
        .bind(request_id)
        .bind(label)
        .fetch_one(conn)
        .await?;
        Ok(count.0 > 0)
    }

    /// Recompute every hash in the chain against the stored entries.
    ///
    /// Returns the id of the first entry whose stored hash does not match
    /// its recomputed value, or `None` when the chain is intact. Any edit
    /// to a historical row breaks verification at that row.
    pub async fn verify_chain(pool: &PgPool) -> Result<Option<DbId>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_logs ORDER BY id");
        let rows = sqlx::query_as::<_, AuditLog>(&query).fetch_all(pool).await?;

        let mut prev: Option<String> = None;
        for row in rows {
            let entry_data = Self::chain_payload(
                &row.action_type,
                &row.entity_type,
                row.entity_id,
                row.user_id,
                &row.description,
                &row.details_json,
            );
            let expected = audit::compute_integrity_hash(prev.as_deref(), &entry_data);
            if expected != row.integrity_hash {
                return Ok(Some(row.id));
            }
            prev = Some(row.integrity_hash);
        }
        Ok(None)
    }

    /// Canonical string an entry's hash is computed over. Insert and verify
    /// must agree on this byte-for-byte.
    fn chain_payload(
        action_type: &str,
        entity_type: &str,
        entity_id: Option<DbId>,
        user_id: Option<DbId>,
        description: &str,
        details: &serde_json::Value,
    ) -> String {
        serde_json::json!({
            "action_type": action_type,
            "entity_type": entity_type,
            "entity_id": entity_id,
            "user_id": user_id,
            "description": description,
            "details": details,
        })
        .to_string()
    }

    /// Workflow step entries for a request, oldest first.
    ///
    /// Workflow steps are audit entries with `action_type = workflow_step`;
    /// the status endpoint reconstructs the step history from them.
    pub async fn list_workflow_steps(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs \
             WHERE action_type = $1 AND entity_type = $2 AND entity_id = $3 \
             ORDER BY id"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(audit::action_types::WORKFLOW_STEP)
            .bind(audit::entity_types::IT_REQUEST)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }
}
