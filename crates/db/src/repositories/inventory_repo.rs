//! Repository for the `inventory_items` and `inventory_movements` tables.
//!
//! Stock levels never change through a plain UPDATE: every quantity change
//! goes through [`InventoryRepo::apply_movement`], which pairs the new level
//! with an append-only ledger row in one transaction.

use sqlx::{PgConnection, PgPool};
use wardtrack_core::inventory;
use wardtrack_core::types::DbId;

use crate::models::inventory::{
    CreateInventoryItem, InventoryItem, InventoryMovement, UpdateInventoryItem,
};

/// Column list for `inventory_items` queries.
const COLUMNS: &str = "\
    id, item_code, name, quantity, minimum_level, status, condition, \
    location_id, created_at, updated_at";

/// Column list for `inventory_movements` queries.
const MOVEMENT_COLUMNS: &str = "\
    id, inventory_item_id, movement_type, quantity, asset_id, actor_id, \
    notes, created_at";

/// Provides CRUD and stock-movement operations for inventory items.
pub struct InventoryRepo;

impl InventoryRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find an inventory item by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items WHERE id = $1");
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item by ID inside an open transaction, locking the row.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find an inventory item by its unique code.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items WHERE item_code = $1");
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all inventory items ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items ORDER BY name");
        sqlx::query_as::<_, InventoryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// List items at or below their minimum stock level.
    pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inventory_items \
             WHERE quantity <= minimum_level ORDER BY name"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the movement ledger for an item, oldest first.
    pub async fn list_movements(
        pool: &PgPool,
        inventory_item_id: DbId,
    ) -> Result<Vec<InventoryMovement>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVEMENT_COLUMNS} FROM inventory_movements \
             WHERE inventory_item_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, InventoryMovement>(&query)
            .bind(inventory_item_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Mutations (transaction scoped)
    // -----------------------------------------------------------------------

    /// Create an inventory item.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateInventoryItem,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items \
             (item_code, name, quantity, minimum_level, condition, location_id) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'new'), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(&input.item_code)
            .bind(&input.name)
            .bind(input.quantity.unwrap_or(0).max(0))
            .bind(input.minimum_level.unwrap_or(0).max(0))
            .bind(input.condition.as_deref())
            .bind(input.location_id)
            .fetch_one(conn)
            .await
    }

    /// Update descriptive fields. Quantity is untouched here.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateInventoryItem,
    ) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE inventory_items SET \
             name = COALESCE($2, name), \
             minimum_level = COALESCE($3, minimum_level), \
             condition = COALESCE($4, condition), \
             location_id = COALESCE($5, location_id), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.minimum_level)
            .bind(input.condition.as_deref())
            .bind(input.location_id)
            .fetch_optional(conn)
            .await
    }

    /// Apply a stock movement: update the quantity and append a ledger row.
    ///
    /// The item row is locked, the new level computed by
    /// [`inventory::apply_movement`], and both writes land in the caller's
    /// transaction. Returns the updated item, or `None` when the item does
    /// not exist.
    pub async fn apply_movement(
        conn: &mut PgConnection,
        inventory_item_id: DbId,
        movement_type: &str,
        quantity: i64,
        asset_id: Option<DbId>,
        actor_id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<InventoryItem>, ApplyMovementError> {
        let Some(item) = Self::find_by_id_tx(&mut *conn, inventory_item_id).await? else {
            return Ok(None);
        };

        let new_quantity = inventory::apply_movement(item.quantity, movement_type, quantity)
            .map_err(ApplyMovementError::Rejected)?;

        let query = format!(
            "UPDATE inventory_items SET quantity = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, InventoryItem>(&query)
            .bind(inventory_item_id)
            .bind(new_quantity)
            .fetch_one(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO inventory_movements \
             (inventory_item_id, movement_type, quantity, asset_id, actor_id, notes) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(inventory_item_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(asset_id)
        .bind(actor_id)
        .bind(notes)
        .execute(conn)
        .await?;

        Ok(Some(updated))
    }

    /// Delete an inventory item by ID. Returns true if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Failure modes for [`InventoryRepo::apply_movement`].
#[derive(Debug, thiserror::Error)]
pub enum ApplyMovementError {
    /// The movement violates a stock rule (bad type, non-positive quantity,
    /// or it would drive the level negative).
    #[error(transparent)]
    Rejected(wardtrack_core::error::CoreError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
