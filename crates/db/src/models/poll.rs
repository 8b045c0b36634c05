//! Poll option and vote models.

use launchpad_core::types::{DbId, EpochSecs};
use serde::Serialize;
use sqlx::FromRow;

/// A poll option with its vote tally, counted at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct PollOption {
    pub id: DbId,
    #[serde(rename = "option")]
    pub label: String,
    pub votes: i64,
}

/// A poll as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Poll {
    pub options: Vec<PollOption>,
    /// The option the viewer voted for; `None` if they have not voted or are anonymous.
    pub my_vote_id: Option<DbId>,
}

/// A row from the `poll_votes` table.
#[derive(Debug, Clone, FromRow)]
pub struct PollVote {
    pub id: DbId,
    pub blog_id: DbId,
    pub option_id: DbId,
    pub voter_id: DbId,
    pub created_at: EpochSecs,
}
