//! Startup and founder models and DTOs.

use launchpad_core::types::{DbId, EpochSecs};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `startups` table.
#[derive(Debug, Clone, FromRow)]
pub struct Startup {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub banner: String,
    pub founded_at: EpochSecs,
    pub created_at: EpochSecs,
}

/// DTO for creating or editing a startup.
#[derive(Debug)]
pub struct StartupFields {
    pub name: String,
    pub description: String,
    pub banner: String,
    pub founded_at: EpochSecs,
}

/// A founder joined with their public user fields.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Founder {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub keynote: String,
    pub founded_at: EpochSecs,
}

/// DTO for adding or editing a founder entry.
#[derive(Debug)]
pub struct FounderFields {
    pub startup_id: DbId,
    pub founder_id: DbId,
    pub keynote: String,
    pub founded_at: EpochSecs,
}

/// A startup with its founders, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct StartupDetail {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub banner: String,
    pub founded_at: EpochSecs,
    pub created_at: EpochSecs,
    pub founders: Vec<Founder>,
}
