use std::sync::Arc;

use crate::auth::password::CredentialHasher;
use crate::auth::session::SessionStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: launchpad_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live login sessions, keyed by token.
    pub sessions: Arc<SessionStore>,
    /// Password hasher built from `config.hasher`.
    pub hasher: Arc<CredentialHasher>,
}
