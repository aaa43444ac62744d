//! Handlers for the `/users` admin resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::roles;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::repositories::{AuditLogRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// All assignable role names.
const VALID_ROLES: &[&str] = &[
    roles::ROLE_ADMIN,
    roles::ROLE_IT_SUPPORT,
    roles::ROLE_ASSET_MANAGER,
    roles::ROLE_DEPARTMENT_HEAD,
    roles::ROLE_WAREHOUSE_MANAGER,
];

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
}

/// GET /api/v1/users
///
/// List all user accounts. Any authenticated user (used for assignment
/// pickers).
pub async fn list_users(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/users
///
/// Create a user account. Admin only.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    if !VALID_ROLES.contains(&input.role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{}'",
            input.role
        ))));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &input.username,
        &input.email,
        &password_hash,
        &input.full_name,
        &input.role,
        input.department.as_deref(),
    )
    .await?;

    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::ENTITY_CREATE.to_string(),
            entity_type: entity_types::USER.to_string(),
            entity_id: Some(user.id),
            user_id: Some(admin.user_id),
            description: format!("User {} created with role {}", user.username, user.role),
            details_json: serde_json::json!({ "role": user.role }),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
