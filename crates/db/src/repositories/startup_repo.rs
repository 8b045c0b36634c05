//! Repository for the `startups` table.

use launchpad_core::types::{DbId, EpochSecs};
use sqlx::PgPool;

use crate::models::startup::{Startup, StartupFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, banner, founded_at, created_at";

/// Provides CRUD operations for startups.
pub struct StartupRepo;

impl StartupRepo {
    /// Insert a startup and register `founder_id` as its first founder, atomically.
    pub async fn create_with_founder(
        pool: &PgPool,
        input: &StartupFields,
        founder_id: DbId,
        at: EpochSecs,
    ) -> Result<Startup, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO startups (name, description, banner, founded_at, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let startup = sqlx::query_as::<_, Startup>(&insert_query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.banner)
            .bind(input.founded_at)
            .bind(at)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO founders (startup_id, founder_id, founded_at, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(startup.id)
        .bind(founder_id)
        .bind(input.founded_at)
        .bind(at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(startup)
    }

    /// Find a startup by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM startups WHERE id = $1");
        sqlx::query_as::<_, Startup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a startup's editable fields. Returns `true` if the row was updated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &StartupFields,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE startups
             SET name = $2, description = $3, banner = $4, founded_at = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.banner)
        .bind(input.founded_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a startup. Founders and followers cascade. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM startups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
