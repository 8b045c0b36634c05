//! Repository for the `blogs` table.

use launchpad_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog::{Blog, CreateBlog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, title, content, is_poll, created_at";

/// Provides CRUD operations for blog posts.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a blog post and its poll options in one transaction.
    ///
    /// The post is marked as a poll exactly when `poll_options` is non-empty.
    /// Options keep the order given, which is also their display order.
    pub async fn create(pool: &PgPool, input: &CreateBlog) -> Result<Blog, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO blogs (author_id, title, content, is_poll, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let blog = sqlx::query_as::<_, Blog>(&insert_query)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(!input.poll_options.is_empty())
            .bind(input.created_at)
            .fetch_one(&mut *tx)
            .await?;

        for label in &input.poll_options {
            sqlx::query("INSERT INTO poll_options (blog_id, label) VALUES ($1, $2)")
                .bind(blog.id)
                .bind(label)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(blog)
    }

    /// Find a blog post by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's posts, newest first.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Blog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blogs WHERE author_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a post if it belongs to `author_id`. Options and votes cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_owned(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
