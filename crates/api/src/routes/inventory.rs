//! Route definitions for the `/inventory` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET    /                 -> list items (requires auth)
/// POST   /                 -> create item (warehouse)
/// GET    /low-stock        -> items at or below minimum level
/// GET    /{id}             -> get item (requires auth)
/// PUT    /{id}             -> update item (warehouse)
/// DELETE /{id}             -> delete item (warehouse)
/// POST   /{id}/stock-in    -> increase stock (warehouse)
/// POST   /{id}/stock-out   -> decrease stock (warehouse)
/// POST   /{id}/deploy      -> consume stock into an asset (warehouse)
/// GET    /{id}/movements   -> stock ledger (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list_items).post(inventory::create_item))
        .route("/low-stock", get(inventory::list_low_stock))
        .route(
            "/{id}",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
        .route("/{id}/stock-in", post(inventory::stock_in))
        .route("/{id}/stock-out", post(inventory::stock_out))
        .route("/{id}/deploy", post(inventory::deploy))
        .route("/{id}/movements", get(inventory::list_movements))
}
