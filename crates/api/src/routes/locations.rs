//! Route definitions for the `/locations` lookup resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /      -> list locations (requires auth)
/// POST   /      -> create location (asset manager)
/// GET    /{id}  -> get location (requires auth)
/// DELETE /{id}  -> delete location (asset manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/{id}",
            get(locations::get_location).delete(locations::delete_location),
        )
}
