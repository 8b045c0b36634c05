//! Route definitions for blog posts and polls.

use axum::routing::post;
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// ```text
/// POST /post_blog       -> post_blog (requires session)
/// POST /delete_blog     -> delete_blog (requires session)
/// POST /get_user_blogs  -> get_user_blogs
/// POST /get_poll        -> get_poll
/// POST /vote_poll       -> vote_poll (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/post_blog", post(blogs::post_blog))
        .route("/delete_blog", post(blogs::delete_blog))
        .route("/get_user_blogs", post(blogs::get_user_blogs))
        .route("/get_poll", post(blogs::get_poll))
        .route("/vote_poll", post(blogs::vote_poll))
}
