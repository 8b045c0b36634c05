//! In-memory session store.
//!
//! Maps opaque random tokens to a snapshot of the logged-in account. Sessions
//! live for the lifetime of the process; there is no persistence and no
//! expiry. An account may hold any number of live tokens at once.

use std::collections::HashMap;

use launchpad_core::types::{DbId, EpochSecs};
use launchpad_db::models::user::User;
use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;

/// Length of a generated session token (alphanumeric characters, ~285 bits).
pub const TOKEN_LENGTH: usize = 48;

/// Identity snapshot cached alongside a session token.
///
/// Taken at login. Only `last_seen_at` is refreshed afterwards; every other
/// field stays as it was when the session was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Always the account's primary key.
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub link: String,
    pub bio: String,
    pub created_at: EpochSecs,
    pub last_seen_at: EpochSecs,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            link: user.link.clone(),
            bio: user.bio.clone(),
            created_at: user.created_at,
            last_seen_at: user.last_seen_at,
        }
    }
}

/// Token-to-identity map shared by every request.
///
/// All access goes through a single `RwLock`, so operations on the map are
/// linearizable. Wrap in `Arc` to share.
pub struct SessionStore {
    inner: RwLock<SessionMap>,
}

#[derive(Default)]
struct SessionMap {
    sessions: HashMap<String, Session>,
    /// Bumped by every [`SessionStore::remove_all_for_user`].
    epoch: u64,
    /// Epoch at which each account last had all of its sessions removed.
    revoked_at: HashMap<DbId, u64>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SessionMap::default()),
        }
    }

    /// Current revocation epoch.
    ///
    /// Read it before loading the credential a new session is based on, and
    /// pass it to [`create_unless_revoked`](Self::create_unless_revoked).
    pub async fn epoch(&self) -> u64 {
        self.inner.read().await.epoch
    }

    /// Insert `session` under a freshly generated token and return the token,
    /// unless the account's sessions were revoked after `since`.
    ///
    /// Returns `None` when a revocation (for example a password change) landed
    /// between the caller reading `since` and this call.
    pub async fn create_unless_revoked(&self, session: Session, since: u64) -> Option<String> {
        let mut inner = self.inner.write().await;
        if inner
            .revoked_at
            .get(&session.id)
            .is_some_and(|&revoked| revoked > since)
        {
            return None;
        }
        let token = generate_token();
        inner.sessions.insert(token.clone(), session);
        Some(token)
    }

    /// Look up the identity behind `token`.
    pub async fn lookup(&self, token: &str) -> Option<Session> {
        self.inner.read().await.sessions.get(token).cloned()
    }

    /// Set `last_seen_at` on a live session and return the updated snapshot.
    pub async fn touch(&self, token: &str, at: EpochSecs) -> Option<Session> {
        let mut inner = self.inner.write().await;
        let session = inner.sessions.get_mut(token)?;
        session.last_seen_at = at;
        Some(session.clone())
    }

    /// Remove a single token. Removing an absent token is a no-op.
    pub async fn remove(&self, token: &str) {
        self.inner.write().await.sessions.remove(token);
    }

    /// Remove every token belonging to `user_id` and revoke any session still
    /// being created from an older epoch. Returns how many tokens were removed.
    pub async fn remove_all_for_user(&self, user_id: DbId) -> usize {
        let mut inner = self.inner.write().await;
        inner.epoch += 1;
        let epoch = inner.epoch;
        inner.revoked_at.insert(user_id, epoch);

        let before = inner.sessions.len();
        inner.sessions.retain(|_, session| session.id != user_id);
        before - inner.sessions.len()
    }

    /// Number of live tokens held by `user_id`.
    pub async fn count_for_user(&self, user_id: DbId) -> usize {
        self.inner
            .read()
            .await
            .sessions
            .values()
            .filter(|session| session.id == user_id)
            .count()
    }

    /// Total number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Attributes of the session cookie.
#[derive(Debug, Clone, Default)]
pub struct SessionCookieConfig {
    /// Add the `Secure` attribute (default: `false`).
    pub secure: bool,
}

impl SessionCookieConfig {
    /// Load from `SESSION_COOKIE_SECURE` (`true` / `false`, default `false`).
    ///
    /// # Panics
    ///
    /// Panics if the variable is set to anything other than a bool.
    pub fn from_env() -> Self {
        let secure = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");
        Self { secure }
    }
}
