//! Route definitions for startups and founders.

use axum::routing::post;
use axum::Router;

use crate::handlers::startups;
use crate::state::AppState;

/// ```text
/// POST /create_startup    -> create_startup (requires session)
/// POST /update_startup    -> update_startup (requires session, founders only)
/// POST /delete_startup    -> delete_startup (requires session, founders only)
/// POST /get_startup       -> get_startup
/// POST /follow_startup    -> follow_startup (requires session)
/// POST /unfollow_startup  -> unfollow_startup (requires session)
/// POST /add_founder       -> add_founder (requires session, founders only)
/// POST /edit_founder      -> edit_founder (requires session, founders only)
/// POST /remove_founder    -> remove_founder (requires session, founders only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create_startup", post(startups::create_startup))
        .route("/update_startup", post(startups::update_startup))
        .route("/delete_startup", post(startups::delete_startup))
        .route("/get_startup", post(startups::get_startup))
        .route("/follow_startup", post(startups::follow_startup))
        .route("/unfollow_startup", post(startups::unfollow_startup))
        .route("/add_founder", post(startups::add_founder))
        .route("/edit_founder", post(startups::edit_founder))
        .route("/remove_founder", post(startups::remove_founder))
}
