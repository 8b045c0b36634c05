//! Session token extraction and the session cookie.
//!
//! Browsers carry the token in the `launchpad_session` cookie. Other clients
//! may send `Authorization: Bearer <token>` instead; the bearer header wins
//! when both are present.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use launchpad_core::error::CoreError;

use crate::auth::session::{Session, SessionCookieConfig, SessionStore};
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE_NAME: &str = "launchpad_session";

/// A resolved session together with the token that selected it.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub session: Session,
}

/// The caller's session, or `None` for anonymous callers and unknown tokens.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<CurrentSession>);

/// The caller's session. Rejects with 401 when there is none.
///
/// ```ignore
/// async fn my_handler(RequireSession(current): RequireSession) -> AppResult<StatusCode> {
///     tracing::info!(user_id = current.session.id, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireSession(pub CurrentSession);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(current_session(&parts.headers, &state.sessions).await))
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        current_session(&parts.headers, &state.sessions)
            .await
            .map(RequireSession)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not logged in".into())))
    }
}

/// Resolve a token to the identity it belongs to.
pub async fn resolve_session(store: &SessionStore, token: &str) -> Option<Session> {
    store.lookup(token).await
}

async fn current_session(headers: &HeaderMap, store: &SessionStore) -> Option<CurrentSession> {
    let token = extract_session_token(headers)?;
    let session = resolve_session(store, &token).await?;
    Some(CurrentSession { token, session })
}

/// Pull the session token from the bearer header or the session cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    extract_bearer_token(headers).or_else(|| extract_cookie_token(headers))
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value carrying a new session token.
///
/// No `Max-Age`: the cookie lasts for the browser session, matching the
/// server-side lifetime.
pub fn session_cookie(config: &SessionCookieConfig, token: &str) -> Option<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax");
    if config.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &SessionCookieConfig) -> HeaderValue {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}
