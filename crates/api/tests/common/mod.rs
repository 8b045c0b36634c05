#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use launchpad_api::auth::password::{CredentialHasher, HasherConfig};
use launchpad_api::auth::session::{SessionCookieConfig, SessionStore};
use launchpad_api::config::ServerConfig;
use launchpad_api::middleware::session::SESSION_COOKIE_NAME;
use launchpad_api::router::build_app_router;
use launchpad_api::state::AppState;

/// Cheap Argon2 parameters so tests stay fast.
pub fn cheap_hasher_config() -> HasherConfig {
    HasherConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        hasher: cheap_hasher_config(),
        session_cookie: SessionCookieConfig { secure: false },
    }
}

/// Build the state a test app runs on, with an empty session store.
pub fn test_state(pool: PgPool, config: &ServerConfig) -> AppState {
    let hasher = CredentialHasher::new(&config.hasher).expect("valid test hasher params");
    AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::new(SessionStore::new()),
        hasher: Arc::new(hasher),
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_state(pool).0
}

/// Like [`build_test_app`], but also hands back the state so tests can
/// inspect the session store directly.
pub fn build_test_app_with_state(pool: PgPool) -> (Router, AppState) {
    let config = test_config();
    let state = test_state(pool, &config);
    (build_app_router(state.clone(), &config), state)
}

/// Issue a `GET` request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Call a business method anonymously.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_json_session(app, uri, body, None).await
}

/// Call a business method, sending `token` in the session cookie if given.
pub async fn post_json_session(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The session token set by a response, if any. An emptied cookie yields `Some("")`.
pub fn session_token(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let (pair, _) = value.split_once(';').unwrap_or((value, ""));
    let (name, token) = pair.split_once('=')?;
    (name == SESSION_COOKIE_NAME).then(|| token.to_string())
}

/// Register an account through the API and assert it succeeded.
pub async fn register(app: &Router, username: &str, password: &str) {
    let body = serde_json::json!({
        "username": username,
        "password": password,
        "name": username,
        "email": format!("{username}@example.com"),
    });
    let response = post_json(app.clone(), "/api/v1/register", body).await;
    assert_eq!(body_json(response).await["data"], true, "registration of {username} failed");
}

/// Log in through the API and return the session token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app.clone(), "/api/v1/login", body).await;
    let token = session_token(&response).expect("login should set the session cookie");
    assert_eq!(body_json(response).await["data"], true);
    token
}

/// Register and log in, returning `(user_id, token)`.
pub async fn signup(app: &Router, username: &str) -> (i64, String) {
    register(app, username, "Secret123").await;
    let token = login(app, username, "Secret123").await;
    let response = post_json_session(
        app.clone(),
        "/api/v1/get_session",
        serde_json::json!({}),
        Some(&token),
    )
    .await;
    let id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("session should carry the user id");
    (id, token)
}
