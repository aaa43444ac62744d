//! Handlers for the `/auth` resource (login, logout, current user).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::types::DbId;
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::repositories::{AuditLogRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::LOGIN.to_string(),
            entity_type: entity_types::USER.to_string(),
            entity_id: Some(user.id),
            user_id: Some(user.id),
            description: format!("User {} logged in", user.username),
            details_json: serde_json::json!({}),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Login successful");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Records a logout audit entry. Token invalidation is client-side (tokens
/// are short-lived).
pub async fn logout(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<DataResponse<&'static str>>> {
    AuditLogRepo::record(
        &state.pool,
        &CreateAuditLog {
            action_type: action_types::LOGOUT.to_string(),
            entity_type: entity_types::USER.to_string(),
            entity_id: Some(auth.user_id),
            user_id: Some(auth.user_id),
            description: "User logged out".to_string(),
            details_json: serde_json::json!({}),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: "logged_out" }))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's profile.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<DataResponse<UserInfo>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        },
    }))
}
