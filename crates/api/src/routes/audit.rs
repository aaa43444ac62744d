//! Route definitions for the `/audit` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/audit`. Admin only.
///
/// ```text
/// GET /                                  -> filterable audit trail
/// GET /entity/{entity_type}/{entity_id}  -> trail for one entity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::query_audit_log))
        .route(
            "/entity/{entity_type}/{entity_id}",
            get(audit::entity_trail),
        )
}
