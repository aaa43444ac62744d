//! Repository for the `assets` and `asset_movements` tables.

use sqlx::{PgConnection, PgPool};
use wardtrack_core::types::DbId;

use crate::models::asset::{Asset, AssetMovement, AssetSearchParams, CreateAsset, MoveAsset, UpdateAsset};

/// Column list for `assets` queries.
const COLUMNS: &str = "\
    id, asset_tag, category, brand, model, serial_number, status, \
    location_id, assigned_to, warranty_expiry, purchase_price, \
    row_version, created_at, updated_at";

/// Column list for `asset_movements` queries.
const MOVEMENT_COLUMNS: &str = "\
    id, asset_id, from_location_id, to_location_id, from_user_id, \
    to_user_id, reason, moved_by, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Provides CRUD and transition operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an asset by ID inside an open transaction.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find an asset by its unique tag.
    pub async fn find_by_tag(pool: &PgPool, tag: &str) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE asset_tag = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(tag)
            .fetch_optional(pool)
            .await
    }

    /// Search assets with optional filters, newest first.
    pub async fn search(
        pool: &PgPool,
        params: &AssetSearchParams,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_index = 0u32;

        if params.q.is_some() {
            bind_index += 1;
            conditions.push(format!(
                "(asset_tag ILIKE ${bind_index} OR model ILIKE ${bind_index})"
            ));
        }
        if params.status.is_some() {
            bind_index += 1;
            conditions.push(format!("status = ${bind_index}"));
        }
        if params.category.is_some() {
            bind_index += 1;
            conditions.push(format!("category = ${bind_index}"));
        }
        if params.location_id.is_some() {
            bind_index += 1;
            conditions.push(format!("location_id = ${bind_index}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_param = bind_index + 1;
        let offset_param = bind_index + 2;
        let query = format!(
            "SELECT {COLUMNS} FROM assets {where_clause} \
             ORDER BY created_at DESC LIMIT ${limit_param} OFFSET ${offset_param}"
        );

        let mut q = sqlx::query_as::<_, Asset>(&query);
        if let Some(term) = &params.q {
            q = q.bind(format!("%{term}%"));
        }
        if let Some(status) = &params.status {
            q = q.bind(status);
        }
        if let Some(category) = &params.category {
            q = q.bind(category);
        }
        if let Some(location_id) = params.location_id {
            q = q.bind(location_id);
        }
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// List the movement history for an asset, oldest first.
    pub async fn list_movements(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<Vec<AssetMovement>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVEMENT_COLUMNS} FROM asset_movements \
             WHERE asset_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, AssetMovement>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent movement for an asset, if any.
    pub async fn last_movement_tx(
        conn: &mut PgConnection,
        asset_id: DbId,
    ) -> Result<Option<AssetMovement>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVEMENT_COLUMNS} FROM asset_movements \
             WHERE asset_id = $1 ORDER BY id DESC LIMIT 1"
        );
        sqlx::query_as::<_, AssetMovement>(&query)
            .bind(asset_id)
            .fetch_optional(conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Mutations (transaction scoped)
    // -----------------------------------------------------------------------

    /// Register a new asset. Status starts as the schema default.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateAsset,
    ) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets \
             (asset_tag, category, brand, model, serial_number, location_id, \
              warranty_expiry, purchase_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.asset_tag)
            .bind(&input.category)
            .bind(input.brand.as_deref())
            .bind(input.model.as_deref())
            .bind(input.serial_number.as_deref())
            .bind(input.location_id)
            .bind(input.warranty_expiry)
            .bind(input.purchase_price)
            .fetch_one(conn)
            .await
    }

    /// Update descriptive fields, bumping the row version.
    ///
    /// Returns `None` when `expected_version` is stale or the row is gone.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateAsset,
        expected_version: i64,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
             category = COALESCE($3, category), \
             brand = COALESCE($4, brand), \
             model = COALESCE($5, model), \
             serial_number = COALESCE($6, serial_number), \
             warranty_expiry = COALESCE($7, warranty_expiry), \
             purchase_price = COALESCE($8, purchase_price), \
             row_version = row_version + 1, \
             updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(input.category.as_deref())
            .bind(input.brand.as_deref())
            .bind(input.model.as_deref())
            .bind(input.serial_number.as_deref())
            .bind(input.warranty_expiry)
            .bind(input.purchase_price)
            .fetch_optional(conn)
            .await
    }

    /// Set the asset status, bumping the row version.
    ///
    /// The caller validates the transition against the status table first.
    /// Returns `None` when `expected_version` is stale or the row is gone.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        new_status: &str,
        expected_version: i64,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET status = $3, row_version = row_version + 1, \
             updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(new_status)
            .fetch_optional(conn)
            .await
    }

    /// Set the user assignment, bumping the row version.
    pub async fn set_assignment(
        conn: &mut PgConnection,
        id: DbId,
        assigned_to: Option<DbId>,
        expected_version: i64,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET assigned_to = $3, row_version = row_version + 1, \
             updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(assigned_to)
            .fetch_optional(conn)
            .await
    }

    /// Move an asset to a new location/holder, recording the movement.
    ///
    /// The movement row captures the before state from `current`; the asset
    /// row is updated in the same transaction. Returns `None` on a stale
    /// version.
    pub async fn move_asset(
        conn: &mut PgConnection,
        current: &Asset,
        mv: &MoveAsset,
        moved_by: DbId,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET location_id = $3, assigned_to = $4, \
             row_version = row_version + 1, updated_at = NOW() \
             WHERE id = $1 AND row_version = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(current.id)
            .bind(current.row_version)
            .bind(mv.new_location_id)
            .bind(mv.new_user_id)
            .fetch_optional(&mut *conn)
            .await?;

        let Some(updated) = updated else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO asset_movements \
             (asset_id, from_location_id, to_location_id, from_user_id, \
              to_user_id, reason, moved_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(current.id)
        .bind(current.location_id)
        .bind(mv.new_location_id)
        .bind(current.assigned_to)
        .bind(mv.new_user_id)
        .bind(&mv.reason)
        .bind(moved_by)
        .execute(conn)
        .await?;

        Ok(Some(updated))
    }

    /// Delete an asset by ID. Returns true if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
