//! Route definitions for profiles and user follows.

use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST /update_user    -> update_user (requires session)
/// POST /find_user      -> find_user
/// POST /follow_user    -> follow_user (requires session)
/// POST /unfollow_user  -> unfollow_user (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/update_user", post(users::update_user))
        .route("/find_user", post(users::find_user))
        .route("/follow_user", post(users::follow_user))
        .route("/unfollow_user", post(users::unfollow_user))
}
