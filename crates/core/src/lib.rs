//! Domain primitives shared by the database and API crates.
//!
//! - [`types`] -- id and timestamp aliases plus the wall clock.
//! - [`error`] -- the domain-level [`error::CoreError`].
//! - [`validation`] -- format rules applied to every user-supplied field.

pub mod error;
pub mod types;
pub mod validation;
