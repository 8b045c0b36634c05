//! Route definitions for the identity lifecycle.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /get_session   -> get_session
/// POST /login         -> login
/// POST /logout        -> logout
/// POST /register      -> register
/// POST /set_password  -> set_password (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get_session", post(auth::get_session))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/register", post(auth::register))
        .route("/set_password", post(auth::set_password))
}
