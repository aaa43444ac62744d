//! Route definitions for the `/write-offs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::write_offs;
use crate::state::AppState;

/// Routes mounted at `/write-offs`.
///
/// ```text
/// GET  /               -> list records (requires auth, ?status filter)
/// POST /               -> draft record (asset manager)
/// GET  /{id}           -> get record (requires auth)
/// PUT  /{id}           -> edit while mutable (asset manager)
/// POST /{id}/submit    -> draft -> pending approval (asset manager)
/// POST /{id}/approve   -> approve + decommission asset (admin)
/// POST /{id}/reject    -> reject (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(write_offs::list_write_offs).post(write_offs::create_write_off),
        )
        .route(
            "/{id}",
            get(write_offs::get_write_off).put(write_offs::update_write_off),
        )
        .route("/{id}/submit", post(write_offs::submit))
        .route("/{id}/approve", post(write_offs::approve))
        .route("/{id}/reject", post(write_offs::reject))
}
