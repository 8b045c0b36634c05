//! Repository for the `founders` table.

use launchpad_core::types::{DbId, EpochSecs};
use sqlx::PgPool;

use crate::models::startup::{Founder, FounderFields};

/// Provides founder membership operations.
pub struct FounderRepo;

impl FounderRepo {
    /// True if `user_id` is a founder of `startup_id`.
    pub async fn is_founder(
        pool: &PgPool,
        startup_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM founders WHERE startup_id = $1 AND founder_id = $2)",
        )
        .bind(startup_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// List a startup's founders with their public user fields, earliest first.
    pub async fn list_for_startup(
        pool: &PgPool,
        startup_id: DbId,
    ) -> Result<Vec<Founder>, sqlx::Error> {
        sqlx::query_as::<_, Founder>(
            "SELECT u.id, u.username, u.name, u.avatar, f.keynote, f.founded_at
             FROM founders f
             INNER JOIN users u ON u.id = f.founder_id
             WHERE f.startup_id = $1
             ORDER BY f.founded_at, f.id",
        )
        .bind(startup_id)
        .fetch_all(pool)
        .await
    }

    /// Add a founder. Returns `false` if they were already a founder.
    pub async fn add(
        pool: &PgPool,
        input: &FounderFields,
        at: EpochSecs,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO founders (startup_id, founder_id, keynote, founded_at, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_founders_startup_founder DO NOTHING",
        )
        .bind(input.startup_id)
        .bind(input.founder_id)
        .bind(&input.keynote)
        .bind(input.founded_at)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a founder's keynote and founding date. Returns `true` if the row was updated.
    pub async fn update(pool: &PgPool, input: &FounderFields) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE founders SET keynote = $3, founded_at = $4
             WHERE startup_id = $1 AND founder_id = $2",
        )
        .bind(input.startup_id)
        .bind(input.founder_id)
        .bind(&input.keynote)
        .bind(input.founded_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a founder unless they are the startup's only one.
    ///
    /// Locks the startup row first so two concurrent removals cannot both see
    /// a second founder. Returns `true` if a row was deleted.
    pub async fn remove_unless_last(
        pool: &PgPool,
        startup_id: DbId,
        founder_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM startups WHERE id = $1 FOR UPDATE")
            .bind(startup_id)
            .fetch_optional(&mut *tx)
            .await?;

        let result = sqlx::query(
            "DELETE FROM founders
             WHERE startup_id = $1
               AND founder_id = $2
               AND (SELECT COUNT(*) FROM founders WHERE startup_id = $1) > 1",
        )
        .bind(startup_id)
        .bind(founder_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
