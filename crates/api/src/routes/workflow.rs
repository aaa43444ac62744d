//! Route definitions for the repair workflow endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workflow;
use crate::state::AppState;

/// Routes mounted at `/workflow`.
///
/// ```text
/// POST /{request_id}/start                 -> start repair workflow
/// POST /{request_id}/replace               -> deploy temporary replacement
/// POST /{request_id}/procurement           -> generate procurement for parts
/// POST /{request_id}/procurement-received  -> acknowledge received parts
/// POST /{request_id}/complete              -> complete the repair
/// GET  /{request_id}/status                -> workflow status
/// ```
///
/// All endpoints require IT support (or admin).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{request_id}/start", post(workflow::start_repair))
        .route("/{request_id}/replace", post(workflow::replace_asset))
        .route(
            "/{request_id}/procurement",
            post(workflow::generate_procurement),
        )
        .route(
            "/{request_id}/procurement-received",
            post(workflow::procurement_received),
        )
        .route("/{request_id}/complete", post(workflow::complete_repair))
        .route("/{request_id}/status", get(workflow::workflow_status))
}
