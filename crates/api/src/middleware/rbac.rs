//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level. `admin` passes every check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wardtrack_core::error::CoreError;
use wardtrack_core::roles::{
    ROLE_ADMIN, ROLE_ASSET_MANAGER, ROLE_IT_SUPPORT, ROLE_WAREHOUSE_MANAGER,
};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `it_support` or `admin`. Rejects with 403 Forbidden otherwise.
///
/// Gates repair handling: request transitions, asset status changes, and the
/// workflow operations.
pub struct RequireItSupport(pub AuthUser);

impl FromRequestParts<AppState> for RequireItSupport {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_IT_SUPPORT {
            return Err(AppError::Core(CoreError::Forbidden(
                "IT support or Admin role required".into(),
            )));
        }
        Ok(RequireItSupport(user))
    }
}

/// Requires `asset_manager`, `it_support`, or `admin`. Rejects with 403
/// Forbidden otherwise.
///
/// Gates asset registration, procurement approval, and write-off drafting.
pub struct RequireAssetManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireAssetManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN
            && user.role != ROLE_IT_SUPPORT
            && user.role != ROLE_ASSET_MANAGER
        {
            return Err(AppError::Core(CoreError::Forbidden(
                "Asset manager, IT support, or Admin role required".into(),
            )));
        }
        Ok(RequireAssetManager(user))
    }
}

/// Requires `warehouse_manager` or `admin`. Rejects with 403 Forbidden
/// otherwise.
///
/// Gates inventory stock mutations and procurement receiving.
pub struct RequireWarehouse(pub AuthUser);

impl FromRequestParts<AppState> for RequireWarehouse {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_WAREHOUSE_MANAGER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Warehouse manager or Admin role required".into(),
            )));
        }
        Ok(RequireWarehouse(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
