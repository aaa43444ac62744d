//! Shared fixtures for the repository integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use wardtrack_db::models::asset::CreateAsset;
use wardtrack_db::models::inventory::CreateInventoryItem;
use wardtrack_db::models::location::CreateLocation;
use wardtrack_db::models::request::CreateRequest;
use wardtrack_db::models::user::User;
use wardtrack_db::repositories::UserRepo;

/// Insert a user with a throwaway password hash.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        username,
        &format!("{username}@hospital.test"),
        "$argon2id$test-not-a-real-hash",
        &format!("{username} Test"),
        role,
        None,
    )
    .await
    .unwrap()
}

pub fn new_asset(tag: &str, category: &str) -> CreateAsset {
    CreateAsset {
        asset_tag: tag.to_string(),
        category: category.to_string(),
        brand: None,
        model: None,
        serial_number: None,
        location_id: None,
        warranty_expiry: None,
        purchase_price: None,
    }
}

pub fn new_location(name: &str) -> CreateLocation {
    CreateLocation {
        name: name.to_string(),
        building: None,
        floor: None,
        room: None,
        description: None,
    }
}

pub fn new_inventory_item(code: &str, name: &str, quantity: i64) -> CreateInventoryItem {
    CreateInventoryItem {
        item_code: code.to_string(),
        name: name.to_string(),
        quantity: Some(quantity),
        minimum_level: Some(2),
        condition: None,
        location_id: None,
    }
}

pub fn new_request(title: &str) -> CreateRequest {
    CreateRequest {
        request_type: "repair".to_string(),
        priority: "medium".to_string(),
        title: title.to_string(),
        description: None,
        damaged_asset_id: None,
        related_asset_id: None,
        required_inventory_item_id: None,
        required_by_date: None,
    }
}
