//! Repository for the `poll_options` and `poll_votes` tables.
//!
//! Vote tallies are never stored: every read groups `poll_votes` by option.

use launchpad_core::types::{DbId, EpochSecs};
use sqlx::{FromRow, PgPool};

use crate::models::poll::{Poll, PollOption, PollVote};

/// Column list for `poll_votes`.
const VOTE_COLUMNS: &str = "id, blog_id, option_id, voter_id, created_at";

/// One option row of a poll read, flagged if it holds the viewer's vote.
#[derive(FromRow)]
struct OptionTally {
    id: DbId,
    label: String,
    votes: i64,
    mine: bool,
}

/// Provides poll reads and the vote upsert.
pub struct PollRepo;

impl PollRepo {
    /// Assemble a post's poll for `viewer`. Returns `None` if the post has no options.
    ///
    /// Tallies and the viewer's own choice come from one statement, so both
    /// reflect the same snapshot of `poll_votes`.
    pub async fn get_poll(
        pool: &PgPool,
        blog_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<Poll>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OptionTally>(
            "SELECT o.id, o.label, COUNT(v.id) AS votes,
                    COALESCE(BOOL_OR(v.voter_id = $2), FALSE) AS mine
             FROM poll_options o
             LEFT JOIN poll_votes v ON v.option_id = o.id
             WHERE o.blog_id = $1
             GROUP BY o.id, o.label
             ORDER BY o.id",
        )
        .bind(blog_id)
        .bind(viewer)
        .fetch_all(pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        let my_vote_id = rows.iter().find(|row| row.mine).map(|row| row.id);
        let options = rows
            .into_iter()
            .map(|row| PollOption {
                id: row.id,
                label: row.label,
                votes: row.votes,
            })
            .collect();
        Ok(Some(Poll {
            options,
            my_vote_id,
        }))
    }

    /// Record `voter_id`'s choice on a post as a single atomic upsert.
    ///
    /// `uq_poll_votes_blog_voter` keeps one row per (post, voter): a first vote
    /// inserts, a later vote rewrites `option_id` on the existing row so its
    /// `id` and `created_at` survive. Concurrent callers are serialized by the
    /// constraint, and the last committed write wins.
    ///
    /// Fails with a foreign-key violation if `option_id` is not an option of `blog_id`.
    pub async fn upsert_vote(
        pool: &PgPool,
        blog_id: DbId,
        option_id: DbId,
        voter_id: DbId,
        at: EpochSecs,
    ) -> Result<PollVote, sqlx::Error> {
        let query = format!(
            "INSERT INTO poll_votes (blog_id, option_id, voter_id, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_poll_votes_blog_voter DO UPDATE
             SET option_id = EXCLUDED.option_id
             RETURNING {VOTE_COLUMNS}"
        );
        sqlx::query_as::<_, PollVote>(&query)
            .bind(blog_id)
            .bind(option_id)
            .bind(voter_id)
            .bind(at)
            .fetch_one(pool)
            .await
    }

    /// Number of vote rows a voter holds on a post (0 or 1).
    pub async fn count_votes_by(
        pool: &PgPool,
        blog_id: DbId,
        voter_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM poll_votes WHERE blog_id = $1 AND voter_id = $2",
        )
        .bind(blog_id)
        .bind(voter_id)
        .fetch_one(pool)
        .await
    }
}
