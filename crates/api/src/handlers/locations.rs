//! Handlers for the `/locations` lookup resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::location::CreateLocation;
use wardtrack_db::repositories::{AuditLogRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAssetManager, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/locations
pub async fn list_locations(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let locations = LocationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// GET /api/v1/locations/{id}
pub async fn get_location(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(DataResponse { data: location }))
}

/// POST /api/v1/locations
pub async fn create_location(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Json(input): Json<CreateLocation>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Location name must not be empty".into(),
        )));
    }

    let location = LocationRepo::create(&state.pool, &input).await?;

    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::LOCATION.to_string(),
            entity_id: Some(location.id),
            user_id: Some(actor.user_id),
            description: format!("Location '{}' created", location.name),
            details_json: serde_json::json!({}),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete_location(
    RequireAssetManager(actor): RequireAssetManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = LocationRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }));
    }

    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::ENTITY_DELETE.to_string(),
            entity_type: entity_types::LOCATION.to_string(),
            entity_id: Some(id),
            user_id: Some(actor.user_id),
            description: format!("Location {id} deleted"),
            details_json: serde_json::json!({}),
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
