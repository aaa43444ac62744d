//! HTTP-level integration tests for IT request transitions.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json_auth};
use sqlx::PgPool;

async fn create_request(pool: &PgPool, token: &str, title: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "request_type": "repair",
        "priority": "medium",
        "title": title,
    });
    let response = post_json_auth(app, "/api/v1/requests", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Placing a request on hold requires non-empty comments.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hold_requires_comments(pool: PgPool) {
    let (tech, token) = common::seed_user(&pool, "holder", "it_support").await;
    let request = create_request(&pool, &token, "Monitor flickers").await;
    let id = request["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "assigned_to": tech.id,
        "row_version": request["row_version"].as_i64().unwrap(),
    });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/assign"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let assigned = body_json(response).await;
    assert_eq!(assigned["data"]["status"], "in_progress");
    let row_version = assigned["data"]["row_version"].as_i64().unwrap();

    // No comments field at all.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "row_version": row_version });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/hold"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Blank comments are no better.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "comments": "   ", "row_version": row_version });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/hold"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // With a real justification the hold goes through.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "comments": "Waiting on replacement panel",
        "row_version": row_version,
    });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/hold"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let held = body_json(response).await;
    assert_eq!(held["data"]["status"], "on_hold");

    // Resume keeps comments optional.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "row_version": held["data"]["row_version"].as_i64().unwrap(),
    });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/resume"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "in_progress");
}

/// Cancelling a request requires non-empty comments.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_requires_comments(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "canceller", "it_support").await;
    let request = create_request(&pool, &token, "Obsolete printer").await;
    let id = request["id"].as_i64().unwrap();
    let row_version = request["row_version"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "row_version": row_version });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/cancel"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "comments": "Printer was replaced last week",
        "row_version": row_version,
    });
    let response = post_json_auth(app, &format!("/api/v1/requests/{id}/cancel"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");
}
