//! Request handlers, one submodule per area.
//!
//! Every business method is a `POST` taking a JSON object of named
//! parameters. Handlers delegate to the repositories in `launchpad_db` and
//! map storage errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod blogs;
pub mod startups;
pub mod users;
