//! Blog post model and DTOs.

use launchpad_core::types::{DbId, EpochSecs};
use serde::Serialize;
use sqlx::FromRow;

use super::poll::Poll;

/// A row from the `blogs` table.
#[derive(Debug, Clone, FromRow)]
pub struct Blog {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    pub is_poll: bool,
    pub created_at: EpochSecs,
}

/// DTO for creating a blog post, optionally with poll options.
#[derive(Debug)]
pub struct CreateBlog {
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    /// Option labels in display order. Empty means the post carries no poll.
    pub poll_options: Vec<String>,
    pub created_at: EpochSecs,
}

/// A blog post as listed on its author's page.
#[derive(Debug, Clone, Serialize)]
pub struct UserBlog {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub poll: Option<Poll>,
    pub created_at: EpochSecs,
}
