//! Route definitions for the `/vendors` lookup resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vendors;
use crate::state::AppState;

/// Routes mounted at `/vendors`.
///
/// ```text
/// GET    /      -> list active vendors (requires auth)
/// POST   /      -> create vendor (asset manager)
/// GET    /{id}  -> get vendor (requires auth)
/// DELETE /{id}  -> deactivate vendor (asset manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendors::list_vendors).post(vendors::create_vendor))
        .route(
            "/{id}",
            get(vendors::get_vendor).delete(vendors::deactivate_vendor),
        )
}
