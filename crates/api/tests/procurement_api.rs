//! HTTP-level integration tests for procurement and write-off endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

async fn draft_procurement(pool: &PgPool, token: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "items": [
            { "item_name": "Patch cable", "quantity": 10, "unit_price": 4 },
            { "item_name": "Keyboard", "quantity": 2, "unit_price": 30 },
        ],
    });
    let response = post_json_auth(app, "/api/v1/procurement", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Procurement
// ---------------------------------------------------------------------------

/// Drafting computes the budget from the line items and numbers the request.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_draft_procurement(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "ptech", "it_support").await;

    let json = draft_procurement(&pool, &token).await;
    assert_eq!(json["data"]["status"], "draft");
    assert!(json["data"]["request_number"]
        .as_str()
        .unwrap()
        .starts_with("PR-"));
    // 10 x 4 + 2 x 30 = 100; NUMERIC(14,2) keeps two decimal places.
    assert_eq!(json["data"]["estimated_budget"], "100.00");
}

/// A draft with no line items is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_draft_requires_items(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "ptech2", "it_support").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "items": [] });
    let response = post_json_auth(app, "/api/v1/procurement", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Approval is limited to asset managers and above.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_requires_asset_manager(pool: PgPool) {
    let (_tech, tech_token) = common::seed_user(&pool, "ptech3", "it_support").await;
    let (_wh, wh_token) = common::seed_user(&pool, "pwh", "warehouse_manager").await;

    let draft = draft_procurement(&pool, &tech_token).await;
    let pid = draft["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/procurement/{pid}/submit"),
        serde_json::json!({}),
        &tech_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/procurement/{pid}/approve"),
        serde_json::json!({}),
        &wh_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Skipping states is rejected: a draft cannot be ordered directly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_order_a_draft(pool: PgPool) {
    let (_admin, admin_token) = common::seed_user(&pool, "padmin", "admin").await;

    let draft = draft_procurement(&pool, &admin_token).await;
    let pid = draft["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/procurement/{pid}/order"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Line items cannot be appended once the request is past approval.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_items_frozen_after_approval(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "padmin2", "admin").await;

    let draft = draft_procurement(&pool, &token).await;
    let pid = draft["data"]["id"].as_i64().unwrap();

    for step in ["submit", "approve"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/procurement/{pid}/{step}"),
            serde_json::json!({}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "items": [{ "item_name": "Late addition", "quantity": 1, "unit_price": 5 }],
    });
    let response = post_json_auth(app, &format!("/api/v1/procurement/{pid}/items"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Appending items to a draft recomputes the budget.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_items_recomputes_budget(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "ptech4", "it_support").await;

    let draft = draft_procurement(&pool, &token).await;
    let pid = draft["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "items": [{ "item_name": "Mouse", "quantity": 4, "unit_price": 10 }],
    });
    let response = post_json_auth(app, &format!("/api/v1/procurement/{pid}/items"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // 100 from the draft plus 4 x 10.
    assert_eq!(json["data"]["estimated_budget"], "140.00");
}

// ---------------------------------------------------------------------------
// Write-offs
// ---------------------------------------------------------------------------

async fn create_asset(pool: &PgPool, token: &str, tag: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "asset_tag": tag, "category": "laptop" });
    let response = post_json_auth(app, "/api/v1/assets", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Approving a write-off decommissions the asset in the same transaction.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_write_off_approval_decommissions_asset(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "wadmin", "admin").await;
    let asset = create_asset(&pool, &token, "LT-OLD-01").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "asset_id": asset,
        "reason": "Beyond economical repair",
        "method": "recycle",
    });
    let response = post_json_auth(app, "/api/v1/write-offs", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await["data"]["id"].as_i64().unwrap();

    for step in ["submit", "approve"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/write-offs/{record}/{step}"),
            serde_json::json!({}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/assets/{asset}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "decommissioned");

    // Approved records are immutable.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "reason": "Changed my mind" });
    let response = put_json_auth(app, &format!("/api/v1/write-offs/{record}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A draft cannot be approved directly; it must be submitted first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_write_off_draft_cannot_be_approved(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "wadmin2", "admin").await;
    let asset = create_asset(&pool, &token, "LT-OLD-02").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "asset_id": asset,
        "reason": "Water damage",
        "method": "destroy",
    });
    let response = post_json_auth(app, "/api/v1/write-offs", body, &token).await;
    let record = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/write-offs/{record}/approve"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An unknown disposal method is rejected at creation.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_write_off_invalid_method(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "wadmin3", "admin").await;
    let asset = create_asset(&pool, &token, "LT-OLD-03").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "asset_id": asset,
        "reason": "Obsolete",
        "method": "landfill",
    });
    let response = post_json_auth(app, "/api/v1/write-offs", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
