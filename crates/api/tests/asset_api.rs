//! HTTP-level integration tests for asset moves.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

async fn create_location(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/v1/locations", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_asset(pool: &PgPool, token: &str, tag: &str, location_id: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "asset_tag": tag,
        "category": "monitor",
        "location_id": location_id,
    });
    let response = post_json_auth(app, "/api/v1/assets", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn movement_count(pool: &PgPool, token: &str, asset_id: i64) -> usize {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/assets/{asset_id}/movements"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().unwrap().len()
}

/// A move whose target location and assignee already match the asset writes
/// nothing: no movement row, no row_version bump.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_to_same_placement_is_a_noop(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "mover", "admin").await;
    let ward = create_location(&pool, &token, "Ward 3").await;
    let asset = create_asset(&pool, &token, "MON-01", ward).await;
    let asset_id = asset["id"].as_i64().unwrap();
    let row_version = asset["row_version"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "new_location_id": ward,
        "new_user_id": null,
        "reason": "Routine relocation check",
        "row_version": row_version,
    });
    let response =
        post_json_auth(app, &format!("/api/v1/assets/{asset_id}/move"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], false);
    assert_eq!(movement_count(&pool, &token, asset_id).await, 0);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/assets/{asset_id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["row_version"].as_i64().unwrap(), row_version);
}

/// A move to a different location still records exactly one movement.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_to_new_location_records_movement(pool: PgPool) {
    let (_admin, token) = common::seed_user(&pool, "mover2", "admin").await;
    let ward = create_location(&pool, &token, "Ward 5").await;
    let storage = create_location(&pool, &token, "Basement storage").await;
    let asset = create_asset(&pool, &token, "MON-02", ward).await;
    let asset_id = asset["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "new_location_id": storage,
        "new_user_id": null,
        "reason": "Sent to storage",
        "row_version": asset["row_version"].as_i64().unwrap(),
    });
    let response =
        post_json_auth(app, &format!("/api/v1/assets/{asset_id}/move"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], true);
    assert_eq!(
        json["data"]["asset"]["location_id"].as_i64().unwrap(),
        storage
    );
    assert_eq!(movement_count(&pool, &token, asset_id).await, 1);
}
