//! HTTP-level integration tests for startups, founders and startup follows.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_session, signup};
use serde_json::json;
use sqlx::PgPool;

async fn create_startup(app: &axum::Router, token: &str, name: &str) -> i64 {
    let body = json!({
        "name": name,
        "description": "We make rockets",
        "banner": "https://example.com/banner.png",
        "founded_at": 1_600_000_000,
    });
    let response = post_json_session(app.clone(), "/api/v1/create_startup", body, Some(token)).await;
    body_json(response).await["data"]
        .as_i64()
        .expect("create_startup should return the new id")
}

async fn get_startup(app: &axum::Router, startup_id: i64) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/api/v1/get_startup",
        json!({ "startup_id": startup_id }),
    )
    .await;
    body_json(response).await["data"].clone()
}

async fn call(app: &axum::Router, token: &str, method: &str, body: serde_json::Value) {
    let response =
        post_json_session(app.clone(), &format!("/api/v1/{method}"), body, Some(token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT, "{method} failed");
}

fn founder_ids(startup: &serde_json::Value) -> Vec<i64> {
    startup["founders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_creator_is_first_founder(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (alice, token) = signup(&app, "alice").await;
    let startup_id = create_startup(&app, &token, "Rocketry").await;

    let startup = get_startup(&app, startup_id).await;
    assert_eq!(startup["name"], "Rocketry");
    assert_eq!(founder_ids(&startup), vec![alice]);
    assert_eq!(startup["founders"][0]["username"], "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_startup_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup(&app, "alice").await;

    let body = json!({ "name": "", "description": "d", "founded_at": 0 });
    let response = post_json_session(app.clone(), "/api/v1/create_startup", body, Some(&token)).await;
    assert!(body_json(response).await["data"].is_null());

    let body = json!({ "name": "Ok", "description": "d", "banner": "ftp://x", "founded_at": 0 });
    let response = post_json_session(app, "/api/v1/create_startup", body, Some(&token)).await;
    assert!(body_json(response).await["data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_founders_can_edit_or_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = signup(&app, "alice").await;
    let (_, mallory) = signup(&app, "mallory").await;
    let startup_id = create_startup(&app, &alice, "Rocketry").await;

    let edit = json!({
        "startup_id": startup_id,
        "name": "Hijacked",
        "description": "",
        "founded_at": 0,
    });
    call(&app, &mallory, "update_startup", edit).await;
    call(&app, &mallory, "delete_startup", json!({ "startup_id": startup_id })).await;
    assert_eq!(get_startup(&app, startup_id).await["name"], "Rocketry");

    let edit = json!({
        "startup_id": startup_id,
        "name": "Rocketry Labs",
        "description": "Now with labs",
        "founded_at": 1_600_000_000,
    });
    call(&app, &alice, "update_startup", edit).await;
    let startup = get_startup(&app, startup_id).await;
    assert_eq!(startup["name"], "Rocketry Labs");
    assert_eq!(startup["banner"], "");

    call(&app, &alice, "delete_startup", json!({ "startup_id": startup_id })).await;
    assert!(get_startup(&app, startup_id).await.is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_founder_management(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (alice, alice_token) = signup(&app, "alice").await;
    let (bob, bob_token) = signup(&app, "bob").await;
    let startup_id = create_startup(&app, &alice_token, "Rocketry").await;

    let add_bob = json!({
        "startup_id": startup_id,
        "founder_id": bob,
        "keynote": "CTO",
        "founded_at": 1_600_000_100,
    });
    call(&app, &alice_token, "add_founder", add_bob.clone()).await;
    // Duplicate add and a missing user are both no-ops.
    call(&app, &alice_token, "add_founder", add_bob).await;
    call(
        &app,
        &alice_token,
        "add_founder",
        json!({ "startup_id": startup_id, "founder_id": 999_999, "founded_at": 0 }),
    )
    .await;
    assert_eq!(founder_ids(&get_startup(&app, startup_id).await), vec![alice, bob]);

    call(
        &app,
        &bob_token,
        "edit_founder",
        json!({
            "startup_id": startup_id,
            "founder_id": bob,
            "keynote": "Chief rocket officer",
            "founded_at": 1_600_000_100,
        }),
    )
    .await;
    let startup = get_startup(&app, startup_id).await;
    assert_eq!(startup["founders"][1]["keynote"], "Chief rocket officer");

    let remove = |founder_id: i64| json!({ "startup_id": startup_id, "founder_id": founder_id });
    call(&app, &bob_token, "remove_founder", remove(alice)).await;
    assert_eq!(founder_ids(&get_startup(&app, startup_id).await), vec![bob]);

    // The last founder stays.
    call(&app, &bob_token, "remove_founder", remove(bob)).await;
    assert_eq!(founder_ids(&get_startup(&app, startup_id).await), vec![bob]);

    // Alice is no longer a founder and cannot act on the startup.
    call(
        &app,
        &alice_token,
        "add_founder",
        json!({ "startup_id": startup_id, "founder_id": alice, "founded_at": 0 }),
    )
    .await;
    assert_eq!(founder_ids(&get_startup(&app, startup_id).await), vec![bob]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_follow_startup(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (alice, token) = signup(&app, "alice").await;
    let startup_id = create_startup(&app, &token, "Rocketry").await;

    call(&app, &token, "follow_startup", json!({ "startup_id": startup_id })).await;
    call(&app, &token, "follow_startup", json!({ "startup_id": startup_id })).await;
    call(&app, &token, "follow_startup", json!({ "startup_id": 999_999 })).await;

    assert_eq!(followed_count(&pool, alice).await, 1);

    call(&app, &token, "unfollow_startup", json!({ "startup_id": startup_id })).await;
    assert_eq!(followed_count(&pool, alice).await, 0);
}

async fn followed_count(pool: &PgPool, follower_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM startup_followers WHERE follower_id = $1")
        .bind(follower_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_startup_is_null(pool: PgPool) {
    let app = common::build_test_app(pool);
    assert!(get_startup(&app, 12345).await.is_null());
}
