pub mod auth;
pub mod blogs;
pub mod health;
pub mod startups;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every business method is `POST /<method_name>` with a JSON body:
///
/// ```text
/// /get_session /login /logout /register /set_password     identity
/// /update_user /find_user /follow_user /unfollow_user      users
/// /post_blog /delete_blog /get_user_blogs                  blogs
/// /get_poll /vote_poll                                     polls
/// /create_startup /update_startup /delete_startup
/// /get_startup /follow_startup /unfollow_startup           startups
/// /add_founder /edit_founder /remove_founder               founders
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(blogs::router())
        .merge(startups::router())
}
