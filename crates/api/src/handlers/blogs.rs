//! Handlers for blog posts and the poll vote ledger.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use launchpad_core::types::{now_secs, DbId};
use launchpad_core::validation::{BLOG_CONTENT, BLOG_TITLE, MIN_POLL_OPTIONS, POLL_OPTION};
use launchpad_db::models::blog::{CreateBlog, UserBlog};
use launchpad_db::models::poll::Poll;
use launchpad_db::repositories::{BlogRepo, PollRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::session::{MaybeSession, RequireSession};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /post_blog`.
#[derive(Debug, Deserialize)]
pub struct PostBlogRequest {
    pub title: String,
    pub content: String,
    /// Option labels in display order; absent or `null` for a plain post.
    #[serde(default)]
    pub poll_options: Option<Vec<String>>,
}

/// Request body for `POST /delete_blog` and `POST /get_poll`.
#[derive(Debug, Deserialize)]
pub struct BlogIdRequest {
    pub blog_id: DbId,
}

/// Request body for `POST /get_user_blogs`.
#[derive(Debug, Deserialize)]
pub struct UserBlogsRequest {
    pub user_id: DbId,
}

/// Request body for `POST /vote_poll`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub blog_id: DbId,
    pub option_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/post_blog
///
/// Publish a post, optionally with a poll. Returns the new post id, or
/// `null` if any field is invalid.
pub async fn post_blog(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<PostBlogRequest>,
) -> AppResult<Json<DataResponse<Option<DbId>>>> {
    let poll_options = input.poll_options.unwrap_or_default();
    if !is_valid_post(&input.title, &input.content, &poll_options) {
        return Ok(Json(DataResponse::new(None)));
    }

    let author_id = current.session.id;
    let blog = BlogRepo::create(
        &state.pool,
        &CreateBlog {
            author_id,
            title: input.title,
            content: input.content,
            poll_options,
            created_at: now_secs(),
        },
    )
    .await?;

    tracing::info!(blog_id = blog.id, author_id, is_poll = blog.is_poll, "Blog posted");
    Ok(Json(DataResponse::new(Some(blog.id))))
}

/// POST /api/v1/delete_blog
///
/// Delete one of the caller's own posts with its poll and votes.
pub async fn delete_blog(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<BlogIdRequest>,
) -> AppResult<StatusCode> {
    let author_id = current.session.id;
    if BlogRepo::delete_owned(&state.pool, input.blog_id, author_id).await? {
        tracing::info!(blog_id = input.blog_id, author_id, "Blog deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/get_user_blogs
///
/// A user's posts, newest first, each with its poll as seen by the caller.
pub async fn get_user_blogs(
    State(state): State<AppState>,
    MaybeSession(current): MaybeSession,
    Json(input): Json<UserBlogsRequest>,
) -> AppResult<Json<DataResponse<Vec<UserBlog>>>> {
    let viewer = current.map(|c| c.session.id);
    let blogs = BlogRepo::list_by_author(&state.pool, input.user_id).await?;

    let mut items = Vec::with_capacity(blogs.len());
    for blog in blogs {
        let poll = if blog.is_poll {
            PollRepo::get_poll(&state.pool, blog.id, viewer).await?
        } else {
            None
        };
        items.push(UserBlog {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            poll,
            created_at: blog.created_at,
        });
    }
    Ok(Json(DataResponse::new(items)))
}

/// POST /api/v1/get_poll
///
/// Live tallies for a post's poll and the caller's current choice.
pub async fn get_poll(
    State(state): State<AppState>,
    MaybeSession(current): MaybeSession,
    Json(input): Json<BlogIdRequest>,
) -> AppResult<Json<DataResponse<Option<Poll>>>> {
    let viewer = current.map(|c| c.session.id);
    let poll = PollRepo::get_poll(&state.pool, input.blog_id, viewer).await?;
    Ok(Json(DataResponse::new(poll)))
}

/// POST /api/v1/vote_poll
///
/// Cast or change the caller's vote. An option that is not part of the
/// post's poll is ignored.
pub async fn vote_poll(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<VoteRequest>,
) -> AppResult<StatusCode> {
    let voter_id = current.session.id;
    match PollRepo::upsert_vote(
        &state.pool,
        input.blog_id,
        input.option_id,
        voter_id,
        now_secs(),
    )
    .await
    {
        Ok(vote) => {
            tracing::debug!(
                blog_id = input.blog_id,
                option_id = vote.option_id,
                voter_id,
                "Vote recorded"
            );
        }
        Err(err) if launchpad_db::is_foreign_key_violation(&err) => {
            tracing::debug!(
                blog_id = input.blog_id,
                option_id = input.option_id,
                voter_id,
                "Vote ignored: option not in poll"
            );
        }
        Err(err) => return Err(err.into()),
    }
    Ok(StatusCode::NO_CONTENT)
}

fn is_valid_post(title: &str, content: &str, poll_options: &[String]) -> bool {
    BLOG_TITLE.is_valid(title)
        && BLOG_CONTENT.is_valid(content)
        && (poll_options.is_empty()
            || (poll_options.len() >= MIN_POLL_OPTIONS
                && poll_options.iter().all(|o| POLL_OPTION.is_valid(o))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn plain_post_needs_title_and_content() {
        assert!(is_valid_post("Hello", "World", &[]));
        assert!(!is_valid_post("", "World", &[]));
        assert!(!is_valid_post("Hello", "   ", &[]));
    }

    #[test]
    fn poll_needs_two_valid_options() {
        assert!(is_valid_post("Q", "Pick", &options(&["A", "B"])));
        assert!(!is_valid_post("Q", "Pick", &options(&["A"])));
        assert!(!is_valid_post("Q", "Pick", &options(&["A", ""])));
        let long = "x".repeat(129);
        assert!(!is_valid_post("Q", "Pick", &options(&["A", long.as_str()])));
    }
}
