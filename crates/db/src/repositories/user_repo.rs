//! Repository for the `users` table.

use launchpad_core::types::{DbId, EpochSecs};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserHandle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, name, email, avatar, link, bio, \
                       created_at, last_seen_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Fails with a unique violation on `uq_users_username` if the name is taken.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (username, password_hash, name, email, avatar, bio, link, created_at, last_seen_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.avatar)
            .bind(&input.bio)
            .bind(&input.link)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find the public handle for a username (case-sensitive).
    pub async fn find_handle(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<UserHandle>, sqlx::Error> {
        sqlx::query_as::<_, UserHandle>(
            "SELECT id, username, name, avatar FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// True if a user with this exact username exists.
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// Apply a sparse profile update. Only non-`None` fields in `input` are written.
    ///
    /// Returns `true` if the row was updated.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar = COALESCE($4, avatar),
                bio = COALESCE($5, bio),
                link = COALESCE($6, link)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.avatar)
        .bind(&input.bio)
        .bind(&input.link)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Swap the password hash only if it still equals `expected_hash`.
    ///
    /// Returns `false` when the hash changed underneath the caller (for example
    /// a concurrent password change), leaving the newer hash in place.
    pub async fn replace_password_hash(
        pool: &PgPool,
        id: DbId,
        expected_hash: &str,
        new_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $3 WHERE id = $1 AND password_hash = $2",
        )
        .bind(id)
        .bind(expected_hash)
        .bind(new_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record activity for a user. Returns `true` if the row was updated.
    pub async fn touch_last_seen(
        pool: &PgPool,
        id: DbId,
        at: EpochSecs,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_seen_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
