pub mod assets;
pub mod audit;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod locations;
pub mod procurement;
pub mod requests;
pub mod users;
pub mod vendors;
pub mod workflow;
pub mod write_offs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/logout                             logout (requires auth)
/// /auth/me                                 current user profile
///
/// /users                                   list, create (create is admin only)
/// /users/{id}                              get
///
/// /locations                               list, create
/// /locations/{id}                          get, delete
///
/// /vendors                                 list, create
/// /vendors/{id}                            get, deactivate
///
/// /assets                                  search, create
/// /assets/{id}                             get, update, delete
/// /assets/{id}/status                      change status (POST)
/// /assets/{id}/move                        relocate / reassign (POST)
/// /assets/{id}/assign                      assign to user (POST)
/// /assets/{id}/unassign                    clear assignment (POST)
/// /assets/{id}/movements                   movement history (GET)
///
/// /inventory                               list, create
/// /inventory/low-stock                     low stock report (GET)
/// /inventory/{id}                          get, update, delete
/// /inventory/{id}/stock-in                 stock in (POST)
/// /inventory/{id}/stock-out                stock out (POST)
/// /inventory/{id}/deploy                   deploy into asset (POST)
/// /inventory/{id}/movements                stock ledger (GET)
///
/// /requests                                search, submit
/// /requests/{id}                           get
/// /requests/{id}/activities                activity trail (GET)
/// /requests/{id}/assign                    assign handler (POST)
/// /requests/{id}/hold                      put on hold (POST)
/// /requests/{id}/resume                    resume (POST)
/// /requests/{id}/complete                  complete (POST)
/// /requests/{id}/cancel                    cancel (POST)
///
/// /procurement                             search, draft
/// /procurement/{id}                        get, update header
/// /procurement/{id}/items                  list, append line items
/// /procurement/{id}/submit                 submit for approval (POST)
/// /procurement/{id}/approve                approve (POST)
/// /procurement/{id}/order                  mark ordered (POST)
/// /procurement/{id}/receive                receive + stock in (POST)
/// /procurement/{id}/cancel                 cancel (POST)
///
/// /write-offs                              list, draft
/// /write-offs/{id}                         get, edit
/// /write-offs/{id}/submit                  submit for approval (POST)
/// /write-offs/{id}/approve                 approve + decommission (POST)
/// /write-offs/{id}/reject                  reject (POST)
///
/// /workflow/{request_id}/start             start repair workflow (POST)
/// /workflow/{request_id}/replace           deploy temporary replacement (POST)
/// /workflow/{request_id}/procurement       generate procurement (POST)
/// /workflow/{request_id}/procurement-received  acknowledge parts (POST)
/// /workflow/{request_id}/complete          complete repair (POST)
/// /workflow/{request_id}/status            workflow status (GET)
///
/// /audit                                   filterable trail (admin only)
/// /audit/entity/{entity_type}/{entity_id}  trail for one entity (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout, profile).
        .nest("/auth", auth::router())
        // User management.
        .nest("/users", users::router())
        // Reference data.
        .nest("/locations", locations::router())
        .nest("/vendors", vendors::router())
        // Asset registry: CRUD, status, assignment, movements.
        .nest("/assets", assets::router())
        // Consumable inventory and the stock ledger.
        .nest("/inventory", inventory::router())
        // IT request intake and handling.
        .nest("/requests", requests::router())
        // Procurement lifecycle.
        .nest("/procurement", procurement::router())
        // Asset disposal approval.
        .nest("/write-offs", write_offs::router())
        // Repair workflow orchestration.
        .nest("/workflow", workflow::router())
        // Append-only audit trail.
        .nest("/audit", audit::router())
}
