//! HTTP-level integration tests for auth and user management endpoints.
//!
//! Tests cover login, profile retrieval, RBAC enforcement, and admin user
//! creation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Auth flow tests
// ---------------------------------------------------------------------------

/// Successful login returns 200 with access_token and user info.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, _token) = common::seed_user(&pool, "loginuser", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(
        json["access_token"].is_string(),
        "response must contain access_token"
    );
    assert!(
        json["expires_in"].is_number(),
        "response must contain expires_in"
    );
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["role"], "admin");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::seed_user(&pool, "wrongpw", "it_support").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// GET /auth/me returns the authenticated user's profile.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (user, token) = common::seed_user(&pool, "profileuser", "asset_manager").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["username"], "profileuser");
    assert_eq!(json["data"]["role"], "asset_manager");
}

// ---------------------------------------------------------------------------
// RBAC enforcement tests
// ---------------------------------------------------------------------------

/// Protected endpoints require authentication -- missing token returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/assets").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage bearer token returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/assets", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A correctly signed token with a role outside the known set returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_with_unknown_role_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let config = common::test_config();
    let token = wardtrack_api::auth::jwt::generate_access_token(1, "superuser", &config.jwt)
        .expect("token generation should succeed");

    let response = get_auth(app, "/api/v1/assets", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// User creation is admin-only; other roles get 403.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_requires_admin(pool: PgPool) {
    let (_user, token) = common::seed_user(&pool, "supportuser", "it_support").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "intruder",
        "email": "intruder@hospital.test",
        "password": "strong_password_123!",
        "full_name": "Not Allowed",
        "role": "it_support",
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// The audit trail is admin-only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_audit_trail_requires_admin(pool: PgPool) {
    let (_user, token) = common::seed_user(&pool, "whmgr", "warehouse_manager").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/audit", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Admin user management tests
// ---------------------------------------------------------------------------

/// Admin can create a new user and receives 201.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_user(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "adminmgr", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "newnurse",
        "email": "newnurse@hospital.test",
        "password": "strong_password_123!",
        "full_name": "New Nurse",
        "role": "department_head",
        "department": "Cardiology",
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "newnurse");
    assert_eq!(json["data"]["role"], "department_head");
}

/// A password below the minimum length is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_weak_password(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "pwadmin", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "weakpw",
        "email": "weakpw@hospital.test",
        "password": "short",
        "full_name": "Weak Password",
        "role": "it_support",
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An unknown role name is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_invalid_role(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "roleadmin", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "badrole",
        "email": "badrole@hospital.test",
        "password": "strong_password_123!",
        "full_name": "Bad Role",
        "role": "superuser",
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// The root-level health endpoint reports ok with a healthy database.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_endpoint(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
