//! User entity model and DTOs.

use launchpad_core::types::{DbId, EpochSecs};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub link: String,
    pub bio: String,
    pub created_at: EpochSecs,
    pub last_seen_at: EpochSecs,
}

/// Minimal public identity used for lookups by username.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserHandle {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub avatar: String,
}

/// DTO for creating a new user. `created_at` doubles as the initial `last_seen_at`.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub bio: String,
    pub link: String,
    pub created_at: EpochSecs,
}

/// DTO for a sparse profile update. `None` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
}

impl UpdateUser {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.bio.is_none()
            && self.link.is_none()
    }
}
