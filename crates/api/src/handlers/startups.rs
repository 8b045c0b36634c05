//! Handlers for startups, their founders and startup follows.
//!
//! Only founders may edit, delete or change the founder list of a startup.
//! Non-founders get the same silent no-op as an invalid request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use launchpad_core::types::{now_secs, DbId, EpochSecs};
use launchpad_core::validation::{BIO, NAME, URL};
use launchpad_db::models::startup::{FounderFields, StartupDetail, StartupFields};
use launchpad_db::repositories::{FollowRepo, FounderRepo, StartupRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::session::RequireSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /create_startup`.
#[derive(Debug, Deserialize)]
pub struct CreateStartupRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub banner: String,
    pub founded_at: EpochSecs,
}

/// Request body for `POST /update_startup`.
#[derive(Debug, Deserialize)]
pub struct UpdateStartupRequest {
    pub startup_id: DbId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub banner: String,
    pub founded_at: EpochSecs,
}

/// Request body for methods addressing a startup only.
#[derive(Debug, Deserialize)]
pub struct StartupIdRequest {
    pub startup_id: DbId,
}

/// Request body for `POST /add_founder` and `POST /edit_founder`.
#[derive(Debug, Deserialize)]
pub struct FounderRequest {
    pub startup_id: DbId,
    pub founder_id: DbId,
    #[serde(default)]
    pub keynote: String,
    pub founded_at: EpochSecs,
}

/// Request body for `POST /remove_founder`.
#[derive(Debug, Deserialize)]
pub struct RemoveFounderRequest {
    pub startup_id: DbId,
    pub founder_id: DbId,
}

impl FounderRequest {
    fn into_fields(self) -> FounderFields {
        FounderFields {
            startup_id: self.startup_id,
            founder_id: self.founder_id,
            keynote: self.keynote,
            founded_at: self.founded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Startups
// ---------------------------------------------------------------------------

/// POST /api/v1/create_startup
///
/// Create a startup with the caller as its first founder. Returns the id, or
/// `null` if a field is invalid.
pub async fn create_startup(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<CreateStartupRequest>,
) -> AppResult<Json<DataResponse<Option<DbId>>>> {
    let fields = StartupFields {
        name: input.name,
        description: input.description,
        banner: input.banner,
        founded_at: input.founded_at,
    };
    if !is_valid_startup(&fields) {
        return Ok(Json(DataResponse::new(None)));
    }

    let founder_id = current.session.id;
    let startup = StartupRepo::create_with_founder(&state.pool, &fields, founder_id, now_secs())
        .await?;
    tracing::info!(startup_id = startup.id, founder_id, "Startup created");
    Ok(Json(DataResponse::new(Some(startup.id))))
}

/// POST /api/v1/update_startup
pub async fn update_startup(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<UpdateStartupRequest>,
) -> AppResult<StatusCode> {
    let fields = StartupFields {
        name: input.name,
        description: input.description,
        banner: input.banner,
        founded_at: input.founded_at,
    };
    if !is_valid_startup(&fields)
        || !FounderRepo::is_founder(&state.pool, input.startup_id, current.session.id).await?
    {
        return Ok(StatusCode::NO_CONTENT);
    }

    StartupRepo::update(&state.pool, input.startup_id, &fields).await?;
    tracing::info!(startup_id = input.startup_id, user_id = current.session.id, "Startup updated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/delete_startup
pub async fn delete_startup(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<StartupIdRequest>,
) -> AppResult<StatusCode> {
    let user_id = current.session.id;
    if FounderRepo::is_founder(&state.pool, input.startup_id, user_id).await?
        && StartupRepo::delete(&state.pool, input.startup_id).await?
    {
        tracing::info!(startup_id = input.startup_id, user_id, "Startup deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/get_startup
///
/// A startup with its founders, or `null`.
pub async fn get_startup(
    State(state): State<AppState>,
    Json(input): Json<StartupIdRequest>,
) -> AppResult<Json<DataResponse<Option<StartupDetail>>>> {
    let Some(startup) = StartupRepo::find_by_id(&state.pool, input.startup_id).await? else {
        return Ok(Json(DataResponse::new(None)));
    };
    let founders = FounderRepo::list_for_startup(&state.pool, startup.id).await?;

    Ok(Json(DataResponse::new(Some(StartupDetail {
        id: startup.id,
        name: startup.name,
        description: startup.description,
        banner: startup.banner,
        founded_at: startup.founded_at,
        created_at: startup.created_at,
        founders,
    }))))
}

/// POST /api/v1/follow_startup
///
/// Following twice or following a missing startup is a no-op.
pub async fn follow_startup(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<StartupIdRequest>,
) -> AppResult<StatusCode> {
    let follower_id = current.session.id;
    match FollowRepo::follow_startup(&state.pool, follower_id, input.startup_id, now_secs()).await
    {
        Ok(_) => {}
        Err(err) if launchpad_db::is_foreign_key_violation(&err) => {
            tracing::debug!(follower_id, startup_id = input.startup_id, "Startup does not exist");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/unfollow_startup
pub async fn unfollow_startup(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<StartupIdRequest>,
) -> AppResult<StatusCode> {
    FollowRepo::unfollow_startup(&state.pool, current.session.id, input.startup_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Founders
// ---------------------------------------------------------------------------

/// POST /api/v1/add_founder
///
/// Adding an existing founder or a missing user is a no-op.
pub async fn add_founder(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<FounderRequest>,
) -> AppResult<StatusCode> {
    let user_id = current.session.id;
    if BIO.is_invalid(&input.keynote)
        || !FounderRepo::is_founder(&state.pool, input.startup_id, user_id).await?
    {
        return Ok(StatusCode::NO_CONTENT);
    }

    let fields = input.into_fields();
    match FounderRepo::add(&state.pool, &fields, now_secs()).await {
        Ok(true) => {
            tracing::info!(
                startup_id = fields.startup_id,
                founder_id = fields.founder_id,
                user_id,
                "Founder added"
            );
        }
        Ok(false) => {}
        Err(err) if launchpad_db::is_foreign_key_violation(&err) => {
            tracing::debug!(founder_id = fields.founder_id, "Founder user does not exist");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/edit_founder
pub async fn edit_founder(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<FounderRequest>,
) -> AppResult<StatusCode> {
    if BIO.is_invalid(&input.keynote)
        || !FounderRepo::is_founder(&state.pool, input.startup_id, current.session.id).await?
    {
        return Ok(StatusCode::NO_CONTENT);
    }

    FounderRepo::update(&state.pool, &input.into_fields()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/remove_founder
///
/// The last remaining founder cannot be removed.
pub async fn remove_founder(
    State(state): State<AppState>,
    RequireSession(current): RequireSession,
    Json(input): Json<RemoveFounderRequest>,
) -> AppResult<StatusCode> {
    let user_id = current.session.id;
    if !FounderRepo::is_founder(&state.pool, input.startup_id, user_id).await? {
        return Ok(StatusCode::NO_CONTENT);
    }

    if FounderRepo::remove_unless_last(&state.pool, input.startup_id, input.founder_id).await? {
        tracing::info!(
            startup_id = input.startup_id,
            founder_id = input.founder_id,
            user_id,
            "Founder removed"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}

fn is_valid_startup(fields: &StartupFields) -> bool {
    NAME.is_valid(&fields.name) && BIO.is_valid(&fields.description) && URL.is_valid(&fields.banner)
}
