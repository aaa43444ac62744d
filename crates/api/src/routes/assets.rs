//! Route definitions for the `/assets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /                 -> search assets (requires auth)
/// POST   /                 -> create asset (asset manager)
/// GET    /{id}             -> get asset (requires auth)
/// PUT    /{id}             -> update asset (asset manager)
/// DELETE /{id}             -> delete asset (asset manager)
/// POST   /{id}/status      -> change status (IT support)
/// POST   /{id}/move        -> relocate / reassign (asset manager)
/// POST   /{id}/assign      -> assign to user (asset manager)
/// POST   /{id}/unassign    -> clear assignment (asset manager)
/// GET    /{id}/movements   -> movement history (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/status", post(assets::change_status))
        .route("/{id}/move", post(assets::move_asset))
        .route("/{id}/assign", post(assets::assign_asset))
        .route("/{id}/unassign", post(assets::unassign_asset))
        .route("/{id}/movements", get(assets::list_movements))
}
