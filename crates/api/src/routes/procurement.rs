//! Route definitions for the `/procurement` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::procurement;
use crate::state::AppState;

/// Routes mounted at `/procurement`.
///
/// ```text
/// GET  /               -> search procurement requests (requires auth)
/// POST /               -> draft procurement (IT support)
/// GET  /{id}           -> get procurement (requires auth)
/// PUT  /{id}           -> update header while editable (IT support)
/// GET  /{id}/items     -> list line items (requires auth)
/// POST /{id}/items     -> append line items while editable (IT support)
/// POST /{id}/submit    -> draft -> pending approval (IT support)
/// POST /{id}/approve   -> pending -> approved (asset manager)
/// POST /{id}/order     -> approved -> ordered (asset manager)
/// POST /{id}/receive   -> ordered -> received, stocks in lines (warehouse)
/// POST /{id}/cancel    -> cancel (asset manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(procurement::list_procurements).post(procurement::create_procurement),
        )
        .route(
            "/{id}",
            get(procurement::get_procurement).put(procurement::update_procurement),
        )
        .route(
            "/{id}/items",
            get(procurement::list_items).post(procurement::add_items),
        )
        .route("/{id}/submit", post(procurement::submit))
        .route("/{id}/approve", post(procurement::approve))
        .route("/{id}/order", post(procurement::order))
        .route("/{id}/receive", post(procurement::receive))
        .route("/{id}/cancel", post(procurement::cancel))
}
