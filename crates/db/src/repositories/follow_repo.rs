//! Repository for the `user_followers` and `startup_followers` tables.

use launchpad_core::types::{DbId, EpochSecs};
use sqlx::PgPool;

/// Provides follow / unfollow operations for users and startups.
///
/// Inserts use `ON CONFLICT DO NOTHING`, so following twice is a no-op
/// rather than a constraint error.
pub struct FollowRepo;

impl FollowRepo {
    /// Make `follower_id` follow `following_id`. Returns `true` if a new row was written.
    pub async fn follow_user(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
        at: EpochSecs,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_followers (follower_id, following_id, created_at)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_user_followers_pair DO NOTHING",
        )
        .bind(follower_id)
        .bind(following_id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a user follow. Returns `true` if a row was deleted.
    pub async fn unfollow_user(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_followers WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// True if `follower_id` currently follows `following_id`.
    pub async fn is_following_user(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM user_followers WHERE follower_id = $1 AND following_id = $2
             )",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(pool)
        .await
    }

    /// Make `follower_id` follow a startup. Returns `true` if a new row was written.
    pub async fn follow_startup(
        pool: &PgPool,
        follower_id: DbId,
        startup_id: DbId,
        at: EpochSecs,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO startup_followers (startup_id, follower_id, created_at)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_startup_followers_pair DO NOTHING",
        )
        .bind(startup_id)
        .bind(follower_id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a startup follow. Returns `true` if a row was deleted.
    pub async fn unfollow_startup(
        pool: &PgPool,
        follower_id: DbId,
        startup_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM startup_followers WHERE startup_id = $1 AND follower_id = $2",
        )
        .bind(startup_id)
        .bind(follower_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
