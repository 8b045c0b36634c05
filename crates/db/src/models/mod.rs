//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO where the entity is editable
//! - `Serialize` read shapes returned to API callers

pub mod blog;
pub mod poll;
pub mod startup;
pub mod user;
