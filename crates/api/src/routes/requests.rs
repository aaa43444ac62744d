//! Route definitions for the `/requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET  /                  -> search requests (requires auth)
/// POST /                  -> submit request (requires auth)
/// GET  /{id}              -> get request (requires auth)
/// GET  /{id}/activities   -> activity trail (requires auth)
/// POST /{id}/assign       -> assign handler (IT support)
/// POST /{id}/hold         -> put on hold (IT support)
/// POST /{id}/resume       -> resume from hold (IT support)
/// POST /{id}/complete     -> complete (IT support)
/// POST /{id}/cancel       -> cancel (IT support)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/{id}", get(requests::get_request))
        .route("/{id}/activities", get(requests::list_activities))
        .route("/{id}/assign", post(requests::assign_request))
        .route("/{id}/hold", post(requests::hold_request))
        .route("/{id}/resume", post(requests::resume_request))
        .route("/{id}/complete", post(requests::complete_request))
        .route("/{id}/cancel", post(requests::cancel_request))
}
