//! End-to-end HTTP tests for the repair workflow.
//!
//! Drives the full scenario through the public API: a damaged asset is
//! reported, a substitute is deployed, parts are procured and received, and
//! the repair is completed with the substitute recalled.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

async fn create_location(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/v1/locations", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_asset(pool: &PgPool, token: &str, tag: &str, location_id: Option<i64>) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "asset_tag": tag,
        "category": "imaging",
        "location_id": location_id,
    });
    let response = post_json_auth(app, "/api/v1/assets", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_inventory_item(pool: &PgPool, token: &str, code: &str, quantity: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "item_code": code,
        "name": "X-ray tube",
        "quantity": quantity,
        "minimum_level": 1,
    });
    let response = post_json_auth(app, "/api/v1/inventory", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_repair_request(
    pool: &PgPool,
    token: &str,
    damaged_asset_id: i64,
    required_inventory_item_id: Option<i64>,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "request_type": "repair",
        "priority": "high",
        "title": "CT scanner down",
        "damaged_asset_id": damaged_asset_id,
        "required_inventory_item_id": required_inventory_item_id,
    });
    let response = post_json_auth(app, "/api/v1/requests", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn get_json(pool: &PgPool, token: &str, uri: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, uri, token).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri} should succeed");
    body_json(response).await
}

async fn post_ok(
    pool: &PgPool,
    token: &str,
    uri: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, uri, body, token).await;
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "POST {uri} should succeed"
    );
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Full scenario
// ---------------------------------------------------------------------------

/// The complete repair lifecycle: start, substitute, procure, receive,
/// acknowledge, complete.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_repair_lifecycle(pool: PgPool) {
    let (_admin, admin_token) = common::seed_user(&pool, "admin1", "admin").await;
    let (_tech, tech_token) = common::seed_user(&pool, "tech1", "it_support").await;
    let (_wh, wh_token) = common::seed_user(&pool, "wh1", "warehouse_manager").await;

    let ward = create_location(&pool, &admin_token, "Radiology").await;
    let damaged = create_asset(&pool, &admin_token, "CT-001", Some(ward)).await;
    let spare = create_asset(&pool, &admin_token, "CT-SPARE", None).await;
    // Zero stock so the workflow must generate procurement.
    let tube = create_inventory_item(&pool, &wh_token, "TUBE-X", 0).await;

    let request = create_repair_request(&pool, &tech_token, damaged, Some(tube)).await;

    // Start: asset goes to maintenance_pending, request to in_progress.
    let start = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/start"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(start["data"]["success"], true, "{}", start["data"]["message"]);
    assert_eq!(start["data"]["requires_procurement"], true);

    let asset_json = get_json(&pool, &tech_token, &format!("/api/v1/assets/{damaged}")).await;
    assert_eq!(asset_json["data"]["status"], "maintenance_pending");
    let request_json = get_json(&pool, &tech_token, &format!("/api/v1/requests/{request}")).await;
    assert_eq!(request_json["data"]["status"], "in_progress");

    // Substitute takes over the damaged asset's ward.
    let replace = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/replace"),
        serde_json::json!({ "replacement_asset_id": spare }),
    )
    .await;
    assert_eq!(
        replace["data"]["success"], true,
        "{}",
        replace["data"]["message"]
    );
    assert_eq!(replace["data"]["location_id"], ward);

    let spare_json = get_json(&pool, &tech_token, &format!("/api/v1/assets/{spare}")).await;
    assert_eq!(spare_json["data"]["status"], "in_use");
    assert_eq!(spare_json["data"]["location_id"], ward);

    // Generate procurement for the missing part.
    let procure = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/procurement"),
        serde_json::json!({
            "part_requests": [{
                "part_name": "X-ray tube",
                "quantity": 2,
                "estimated_unit_price": 1500,
                "inventory_item_id": tube,
            }],
        }),
    )
    .await;
    assert_eq!(
        procure["data"]["success"], true,
        "{}",
        procure["data"]["message"]
    );
    let pid = procure["data"]["generated_procurement_request_ids"][0]
        .as_i64()
        .unwrap();

    // Drive the procurement through its lifecycle.
    post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/procurement/{pid}/submit"),
        serde_json::json!({}),
    )
    .await;
    post_ok(
        &pool,
        &admin_token,
        &format!("/api/v1/procurement/{pid}/approve"),
        serde_json::json!({ "comments": "Approved for repair" }),
    )
    .await;
    post_ok(
        &pool,
        &admin_token,
        &format!("/api/v1/procurement/{pid}/order"),
        serde_json::json!({}),
    )
    .await;
    post_ok(
        &pool,
        &wh_token,
        &format!("/api/v1/procurement/{pid}/receive"),
        serde_json::json!({}),
    )
    .await;

    // Receiving stocked the line into inventory.
    let item_json = get_json(&pool, &wh_token, &format!("/api/v1/inventory/{tube}")).await;
    assert_eq!(item_json["data"]["quantity"], 2);

    // Acknowledge the received parts.
    let received = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/procurement-received"),
        serde_json::json!({ "procurement_request_id": pid }),
    )
    .await;
    assert_eq!(
        received["data"]["success"], true,
        "{}",
        received["data"]["message"]
    );
    assert_eq!(received["data"]["all_parts_received"], true);

    // A repeat acknowledgement is a no-op.
    let repeat = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/procurement-received"),
        serde_json::json!({ "procurement_request_id": pid }),
    )
    .await;
    assert_eq!(repeat["data"]["success"], false);
    assert_eq!(repeat["data"]["all_parts_received"], true);

    // Complete: asset returns to service, substitute is recalled.
    let complete = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/complete"),
        serde_json::json!({ "completion_notes": "Tube replaced" }),
    )
    .await;
    assert_eq!(
        complete["data"]["success"], true,
        "{}",
        complete["data"]["message"]
    );
    assert_eq!(complete["data"]["returned_temporary_asset_id"], spare);

    let asset_json = get_json(&pool, &tech_token, &format!("/api/v1/assets/{damaged}")).await;
    assert_eq!(asset_json["data"]["status"], "available");
    let spare_json = get_json(&pool, &tech_token, &format!("/api/v1/assets/{spare}")).await;
    assert_eq!(spare_json["data"]["status"], "available");
    let request_json = get_json(&pool, &tech_token, &format!("/api/v1/requests/{request}")).await;
    assert_eq!(request_json["data"]["status"], "completed");
    assert!(request_json["data"]["temporary_asset_id"].is_null());

    // A second completion fails cleanly: the request is terminal.
    let again = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/complete"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(again["data"]["success"], false);

    // The status endpoint reconstructs every recorded step.
    let status = get_json(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/status"),
    )
    .await;
    let steps = status["data"]["workflow_steps"].as_array().unwrap();
    assert_eq!(steps.len(), 5, "all five workflow steps must be recorded");
    assert_eq!(steps[0]["label"], "Workflow started");
    assert_eq!(steps[4]["label"], "Repair completed");
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

/// Starting a workflow on a request without a damaged asset fails in the
/// result DTO, not with an error status.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_without_damaged_asset(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "tech2", "it_support").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "request_type": "repair",
        "priority": "medium",
        "title": "No asset linked",
    });
    let response = post_json_auth(app, "/api/v1/requests", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let request = body_json(response).await["data"]["id"].as_i64().unwrap();

    let start = post_ok(
        &pool,
        &token,
        &format!("/api/v1/workflow/{request}/start"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(start["data"]["success"], false);
    assert!(start["data"]["message"]
        .as_str()
        .unwrap()
        .contains("no damaged asset"));
}

/// A replacement that is not available is rejected without any writes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_with_unavailable_asset(pool: PgPool) {
    let (_admin, admin_token) = common::seed_user(&pool, "admin3", "admin").await;
    let (_tech, tech_token) = common::seed_user(&pool, "tech3", "it_support").await;

    let ward = create_location(&pool, &admin_token, "ICU").await;
    let damaged = create_asset(&pool, &admin_token, "VENT-001", Some(ward)).await;
    let busy = create_asset(&pool, &admin_token, "VENT-002", Some(ward)).await;

    // Put the would-be replacement into use.
    let busy_json = get_json(&pool, &admin_token, &format!("/api/v1/assets/{busy}")).await;
    post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/assets/{busy}/status"),
        serde_json::json!({
            "new_status": "in_use",
            "reason": "Deployed to ICU",
            "row_version": busy_json["data"]["row_version"],
        }),
    )
    .await;

    let request = create_repair_request(&pool, &tech_token, damaged, None).await;
    post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/start"),
        serde_json::json!({}),
    )
    .await;

    let replace = post_ok(
        &pool,
        &tech_token,
        &format!("/api/v1/workflow/{request}/replace"),
        serde_json::json!({ "replacement_asset_id": busy }),
    )
    .await;
    assert_eq!(replace["data"]["success"], false);
    assert!(replace["data"]["message"]
        .as_str()
        .unwrap()
        .contains("not available"));

    // Nothing changed on the request.
    let request_json = get_json(&pool, &tech_token, &format!("/api/v1/requests/{request}")).await;
    assert!(request_json["data"]["temporary_asset_id"].is_null());
}

/// Workflow endpoints are limited to IT support and admins.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workflow_forbidden_for_department_head(pool: PgPool) {
    let (_head, token) = common::seed_user(&pool, "head1", "department_head").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/workflow/1/start", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// The status endpoint returns 404 for an unknown request.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_unknown_request(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "tech4", "it_support").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/workflow/9999/status", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Parts already requested for the repair flag procurement as required at
/// start, even without a linked inventory item.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_flags_procurement_when_parts_already_requested(pool: PgPool) {
    let (_tech, token) = common::seed_user(&pool, "tech5", "it_support").await;
    let ward = create_location(&pool, &token, "Ward 9").await;
    let asset = create_asset(&pool, &token, "CT-009", Some(ward)).await;
    let request = create_repair_request(&pool, &token, asset, None).await;

    let generated = post_ok(
        &pool,
        &token,
        &format!("/api/v1/workflow/{request}/procurement"),
        serde_json::json!({
            "part_requests": [
                { "part_name": "Cooling fan", "quantity": 1, "estimated_unit_price": 80 },
            ],
        }),
    )
    .await;
    assert_eq!(generated["data"]["success"], true);
    let pid = generated["data"]["generated_procurement_request_ids"][0]
        .as_i64()
        .unwrap();

    let start = post_ok(
        &pool,
        &token,
        &format!("/api/v1/workflow/{request}/start"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(start["data"]["success"], true);
    assert_eq!(start["data"]["requires_procurement"], true);
    assert_eq!(
        start["data"]["generated_procurement_ids"][0].as_i64().unwrap(),
        pid
    );
}
