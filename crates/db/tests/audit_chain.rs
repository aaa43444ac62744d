//! Integration tests for the hash-chained audit log.

use sqlx::PgPool;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_db::models::audit::{AuditQuery, CreateAuditLog};
use wardtrack_db::repositories::AuditLogRepo;

mod common;
use common::seed_user;

fn entry(action: &str, description: &str, entity_id: Option<i64>) -> CreateAuditLog {
    CreateAuditLog {
        action_type: action.to_string(),
        entity_type: entity_types::ASSET.to_string(),
        entity_id,
        user_id: None,
        description: description.to_string(),
        details_json: serde_json::json!({}),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entries_are_hash_chained(pool: PgPool) {
    let first = AuditLogRepo::record(&pool, &entry(action_types::ENTITY_CREATE, "created", None))
        .await
        .unwrap();
    let second = AuditLogRepo::record(&pool, &entry(action_types::ENTITY_UPDATE, "updated", None))
        .await
        .unwrap();

    assert_eq!(first.integrity_hash.len(), 64);
    assert_ne!(first.integrity_hash, second.integrity_hash);

    // Same content appended again still gets a fresh hash, because the
    // previous link differs.
    let third = AuditLogRepo::record(&pool, &entry(action_types::ENTITY_UPDATE, "updated", None))
        .await
        .unwrap();
    assert_ne!(second.integrity_hash, third.integrity_hash);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verify_chain_detects_tampering(pool: PgPool) {
    AuditLogRepo::record(&pool, &entry(action_types::ENTITY_CREATE, "created", Some(1)))
        .await
        .unwrap();
    let second =
        AuditLogRepo::record(&pool, &entry(action_types::STATUS_CHANGE, "repaired", Some(1)))
            .await
            .unwrap();
    AuditLogRepo::record(&pool, &entry(action_types::ENTITY_UPDATE, "relabelled", Some(1)))
        .await
        .unwrap();

    assert_eq!(AuditLogRepo::verify_chain(&pool).await.unwrap(), None);

    // Rewrite history behind the repository's back.
    sqlx::query("UPDATE audit_logs SET description = 'never repaired' WHERE id = $1")
        .bind(second.id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(
        AuditLogRepo::verify_chain(&pool).await.unwrap(),
        Some(second.id)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_query_filters_by_action_and_entity(pool: PgPool) {
    let user = seed_user(&pool, "auditor", "admin").await;

    let mut e = entry(action_types::STATUS_CHANGE, "status changed", Some(7));
    e.user_id = Some(user.id);
    AuditLogRepo::record(&pool, &e).await.unwrap();
    AuditLogRepo::record(&pool, &entry(action_types::ENTITY_CREATE, "created", Some(7)))
        .await
        .unwrap();
    AuditLogRepo::record(&pool, &entry(action_types::STATUS_CHANGE, "other asset", Some(9)))
        .await
        .unwrap();

    let params = AuditQuery {
        action_type: Some(action_types::STATUS_CHANGE.to_string()),
        entity_type: None,
        entity_id: Some(7),
        user_id: None,
        limit: None,
        offset: None,
    };
    let results = AuditLogRepo::query(&pool, &params).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].user_id, Some(user.id));

    let trail = AuditLogRepo::list_for_entity(&pool, entity_types::ASSET, 7)
        .await
        .unwrap();
    assert_eq!(trail.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_rolls_back_with_enclosing_tx(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    AuditLogRepo::insert(&mut tx, &entry(action_types::ENTITY_DELETE, "deleted", None))
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let params = AuditQuery {
        action_type: None,
        entity_type: None,
        entity_id: None,
        user_id: None,
        limit: None,
        offset: None,
    };
    let results = AuditLogRepo::query(&pool, &params).await.unwrap();
    assert!(results.is_empty());
}
