//! Handlers for profiles and the user follow graph.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use launchpad_core::types::{now_secs, DbId};
use launchpad_core::validation::{BIO, EMAIL, NAME, URL};
use launchpad_db::models::user::{UpdateUser, UserHandle};
use launchpad_db::repositories::{FollowRepo, UserRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::session::RequireSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /find_user`.
#[derive(Debug, Deserialize)]
pub struct FindUserRequest {
    pub username: String,
}

/// Request body for `POST /follow_user` and `POST /unfollow_user`.
#[derive(Debug, Deserialize)]
pub struct FollowUserRequest {
    pub user_id: DbId,
}

/// POST /api/v1/update_user
///
/// Sparse profile update for the caller. Absent fields are left as they are;
/// if any present field is invalid nothing is written. Live sessions keep
/// the snapshot taken at login.
pub async fn update_user(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<bool>>> {
    if input.is_empty() || !is_valid_update(&input) {
        return Ok(Json(DataResponse::new(false)));
    }

    let user_id = current.session.id;
    let updated = UserRepo::update_profile(&state.pool, user_id, &input).await?;
    if updated {
        tracing::info!(user_id, "Profile updated");
    }
    Ok(Json(DataResponse::new(updated)))
}

/// POST /api/v1/find_user
///
/// Public handle for an exact (case-sensitive) username, or `null`.
pub async fn find_user(
    State(state): State<AppState>,
    Json(input): Json<FindUserRequest>,
) -> AppResult<Json<DataResponse<Option<UserHandle>>>> {
    let handle = UserRepo::find_handle(&state.pool, &input.username).await?;
    Ok(Json(DataResponse::new(handle)))
}

/// POST /api/v1/follow_user
///
/// Following yourself, following twice and following a missing user are no-ops.
pub async fn follow_user(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<FollowUserRequest>,
) -> AppResult<StatusCode> {
    let follower_id = current.session.id;
    if follower_id == input.user_id {
        return Ok(StatusCode::NO_CONTENT);
    }

    match FollowRepo::follow_user(&state.pool, follower_id, input.user_id, now_secs()).await {
        Ok(_) => {}
        Err(err) if launchpad_db::is_foreign_key_violation(&err) => {
            tracing::debug!(follower_id, user_id = input.user_id, "Follow target does not exist");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/unfollow_user
pub async fn unfollow_user(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<FollowUserRequest>,
) -> AppResult<StatusCode> {
    FollowRepo::unfollow_user(&state.pool, current.session.id, input.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn is_valid_update(input: &UpdateUser) -> bool {
    let checks = [
        (&input.name, NAME),
        (&input.email, EMAIL),
        (&input.avatar, URL),
        (&input.bio, BIO),
        (&input.link, URL),
    ];
    checks
        .iter()
        .all(|(value, rule)| value.as_deref().map_or(true, |v| rule.is_valid(v)))
}
