//! Handlers for the identity lifecycle: session lookup, login, logout,
//! registration and password change.
//!
//! Expected failures (bad input, unknown user, wrong password) all answer
//! `{ "data": false }` and are indistinguishable from each other.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use launchpad_core::types::now_secs;
use launchpad_core::validation::{BIO, EMAIL, NAME, PASSWORD, URL, USERNAME};
use launchpad_db::models::user::{CreateUser, User};
use launchpad_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::session::Session;
use crate::error::{AppError, AppResult};
use crate::middleware::session::{
    clear_session_cookie, session_cookie, MaybeSession, RequireSession,
};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub link: String,
}

/// Request body for `POST /set_password`.
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/get_session
///
/// Return the caller's identity, or `null` when anonymous. Refreshes
/// `last_seen_at` in both the session and the account row.
pub async fn get_session(
    State(state): State<AppState>,
    MaybeSession(current): MaybeSession,
) -> AppResult<Json<DataResponse<Option<Session>>>> {
    let Some(current) = current else {
        return Ok(Json(DataResponse::new(None)));
    };
    let user_id = current.session.id;
    let now = now_secs();

    if !UserRepo::touch_last_seen(&state.pool, user_id, now).await? {
        let removed = state.sessions.remove_all_for_user(user_id).await;
        tracing::warn!(user_id, removed, "Dropped sessions of a deleted account");
        return Ok(Json(DataResponse::new(None)));
    }

    let session = state.sessions.touch(&current.token, now).await;
    Ok(Json(DataResponse::new(session)))
}

/// POST /api/v1/login
///
/// Verify credentials and start a new session. The token is returned in the
/// session cookie. Each login gets its own token; existing sessions of the
/// same account are untouched.
///
/// A password change that lands while the credentials are being verified
/// wins: the login answers `false` instead of creating a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    // Must be read before the stored hash is loaded.
    let since = state.sessions.epoch().await;

    let Some(user) = authenticate(&state, &input.username, &input.password).await? else {
        return Ok(Json(DataResponse::new(false)).into_response());
    };

    let Some(token) = state
        .sessions
        .create_unless_revoked(Session::from(&user), since)
        .await
    else {
        tracing::debug!(user_id = user.id, "Login rejected: sessions revoked during verification");
        return Ok(Json(DataResponse::new(false)).into_response());
    };
    tracing::info!(user_id = user.id, "User logged in");

    let mut headers = HeaderMap::new();
    if let Some(cookie) = session_cookie(&state.config.session_cookie, &token) {
        headers.insert(SET_COOKIE, cookie);
    }
    Ok((headers, Json(DataResponse::new(true))).into_response())
}

/// POST /api/v1/logout
///
/// End the caller's current session only. Always clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    MaybeSession(current): MaybeSession,
) -> Response {
    if let Some(current) = current {
        state.sessions.remove(&current.token).await;
        tracing::info!(user_id = current.session.id, "User logged out");
    }
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(&state.config.session_cookie))],
    )
        .into_response()
}

/// POST /api/v1/register
///
/// Create an account. Does not log in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<DataResponse<bool>>> {
    let valid = USERNAME.is_valid(&input.username)
        && PASSWORD.is_valid(&input.password)
        && NAME.is_valid(&input.name)
        && EMAIL.is_valid(&input.email)
        && URL.is_valid(&input.avatar)
        && BIO.is_valid(&input.bio)
        && URL.is_valid(&input.link);
    if !valid {
        tracing::debug!("Registration rejected: invalid fields");
        return Ok(Json(DataResponse::new(false)));
    }

    if UserRepo::username_exists(&state.pool, &input.username).await? {
        tracing::debug!("Registration rejected: username taken");
        return Ok(Json(DataResponse::new(false)));
    }

    let created_at = now_secs();
    let password_hash = state.hasher.hash(&input.password, created_at)?;
    let new_user = CreateUser {
        username: input.username,
        password_hash,
        name: input.name,
        email: input.email,
        avatar: input.avatar,
        bio: input.bio,
        link: input.link,
        created_at,
    };

    match UserRepo::create(&state.pool, &new_user).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User registered");
            Ok(Json(DataResponse::new(true)))
        }
        Err(err) if launchpad_db::is_unique_violation(&err) => {
            tracing::debug!("Registration lost a username race");
            Ok(Json(DataResponse::new(false)))
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /api/v1/set_password
///
/// Change the caller's password after re-verifying the old one. On success
/// every session of the account ends, including the caller's.
pub async fn set_password(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<SetPasswordRequest>,
) -> AppResult<Response> {
    if PASSWORD.is_invalid(&input.old_password) || PASSWORD.is_invalid(&input.new_password) {
        return Ok(Json(DataResponse::new(false)).into_response());
    }

    let user_id = current.session.id;
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::SessionDesync { user_id })?;

    if !state
        .hasher
        .verify(&user.password_hash, &input.old_password, user.created_at)
    {
        tracing::debug!(user_id, "Password change rejected: old password mismatch");
        return Ok(Json(DataResponse::new(false)).into_response());
    }

    // Re-bound to the original creation time, never the current time.
    let new_hash = state.hasher.hash(&input.new_password, user.created_at)?;
    if !UserRepo::update_password(&state.pool, user_id, &new_hash).await? {
        return Err(AppError::SessionDesync { user_id });
    }

    let removed = state.sessions.remove_all_for_user(user_id).await;
    tracing::info!(user_id, sessions_removed = removed, "Password changed");

    Ok((
        [(SET_COOKIE, clear_session_cookie(&state.config.session_cookie))],
        Json(DataResponse::new(true)),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check a username/password pair, upgrading the stored hash if its cost
/// parameters are out of date. Returns the account on success.
async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> AppResult<Option<User>> {
    if USERNAME.is_invalid(username) || PASSWORD.is_invalid(password) {
        tracing::debug!("Login rejected: malformed credentials");
        return Ok(None);
    }

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        state.hasher.verify_decoy(password);
        tracing::debug!("Login rejected: unknown username");
        return Ok(None);
    };

    if !state
        .hasher
        .verify(&user.password_hash, password, user.created_at)
    {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Ok(None);
    }

    if state.hasher.needs_rehash(&user.password_hash) {
        upgrade_hash(state, &user, password).await;
    }
    Ok(Some(user))
}

/// Best-effort rehash under the current parameters. Never fails the login.
///
/// The write only lands if the stored hash is still the one just verified,
/// so a concurrent password change is never reverted.
async fn upgrade_hash(state: &AppState, user: &User, password: &str) {
    let new_hash = match state.hasher.hash(password, user.created_at) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Password rehash failed");
            return;
        }
    };

    match UserRepo::replace_password_hash(&state.pool, user.id, &user.password_hash, &new_hash)
        .await
    {
        Ok(true) => tracing::info!(user_id = user.id, "Password hash upgraded"),
        Ok(false) => {
            tracing::debug!(user_id = user.id, "Password hash changed concurrently; upgrade skipped")
        }
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Failed to persist upgraded password hash")
        }
    }
}
