//! Integration tests for the poll vote ledger.
//!
//! Covers the one-vote-per-(post, voter) invariant under concurrent upserts,
//! vote changes preserving the row, idempotent re-votes, and options that
//! belong to a different post.

use futures::future::join_all;
use launchpad_db::models::blog::CreateBlog;
use launchpad_db::models::user::CreateUser;
use launchpad_db::repositories::{BlogRepo, PollRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            name: username.to_string(),
            email: format!("{username}@example.com"),
            avatar: String::new(),
            bio: String::new(),
            link: String::new(),
            created_at: 1_700_000_000,
        },
    )
    .await
    .unwrap();
    user.id
}

async fn seed_poll(pool: &PgPool, author_id: i64, options: &[&str]) -> (i64, Vec<i64>) {
    let blog = BlogRepo::create(
        pool,
        &CreateBlog {
            author_id,
            title: "Which stack?".to_string(),
            content: "Pick one".to_string(),
            poll_options: options.iter().map(|o| o.to_string()).collect(),
            created_at: 1_700_000_100,
        },
    )
    .await
    .unwrap();
    let option_ids: Vec<i64> = PollRepo::get_poll(pool, blog.id, None)
        .await
        .unwrap()
        .map(|poll| poll.options.iter().map(|o| o.id).collect())
        .unwrap_or_default();
    (blog.id, option_ids)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_vote_inserts_and_counts(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["Rust", "Go", "Zig"]).await;

    PollRepo::upsert_vote(&pool, blog_id, options[1], alice, 1_700_000_200)
        .await
        .unwrap();

    let poll = PollRepo::get_poll(&pool, blog_id, Some(alice))
        .await
        .unwrap()
        .expect("post has a poll");
    let counts: Vec<i64> = poll.options.iter().map(|o| o.votes).collect();
    assert_eq!(counts, vec![0, 1, 0]);
    assert_eq!(poll.my_vote_id, Some(options[1]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_changing_vote_updates_the_same_row(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["Rust", "Go"]).await;

    let first = PollRepo::upsert_vote(&pool, blog_id, options[0], alice, 1_700_000_200)
        .await
        .unwrap();
    let second = PollRepo::upsert_vote(&pool, blog_id, options[1], alice, 1_700_000_300)
        .await
        .unwrap();

    assert_eq!(second.id, first.id, "vote change must not create a new row");
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.option_id, options[1]);
    assert_eq!(PollRepo::count_votes_by(&pool, blog_id, alice).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_vote_is_idempotent(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["Rust", "Go"]).await;

    for _ in 0..2 {
        PollRepo::upsert_vote(&pool, blog_id, options[0], alice, 1_700_000_200)
            .await
            .unwrap();
    }

    let listed = PollRepo::get_poll(&pool, blog_id, None).await.unwrap().unwrap().options;
    assert_eq!(listed[0].votes, 1);
    assert_eq!(listed[1].votes, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_votes_leave_exactly_one_row(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["A", "B", "C", "D"]).await;

    let attempts = (0..16).map(|i| {
        let pool = pool.clone();
        let option_id = options[i % options.len()];
        async move { PollRepo::upsert_vote(&pool, blog_id, option_id, alice, 1_700_000_200).await }
    });
    let results = join_all(attempts).await;
    assert!(results.iter().all(|r| r.is_ok()), "no upsert may fail: {results:?}");

    assert_eq!(PollRepo::count_votes_by(&pool, blog_id, alice).await.unwrap(), 1);

    let poll = PollRepo::get_poll(&pool, blog_id, Some(alice)).await.unwrap().unwrap();
    let final_option = poll.my_vote_id.expect("a vote exists");
    assert!(options.contains(&final_option));

    let total: i64 = poll.options.iter().map(|o| o.votes).sum();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_poll_read_matches_own_vote_during_changes(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["A", "B"]).await;
    PollRepo::upsert_vote(&pool, blog_id, options[0], alice, 1_700_000_200)
        .await
        .unwrap();

    let flipper = {
        let pool = pool.clone();
        let options = options.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                PollRepo::upsert_vote(&pool, blog_id, options[i % 2], alice, 1_700_000_200)
                    .await
                    .unwrap();
            }
        })
    };
    let reader = {
        let pool = pool.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let poll = PollRepo::get_poll(&pool, blog_id, Some(alice))
                    .await
                    .unwrap()
                    .unwrap();
                let mine = poll.my_vote_id.expect("alice has voted");
                let tally = poll.options.iter().find(|o| o.id == mine).unwrap();
                assert_eq!(tally.votes, 1, "own vote must show in the same read");
                assert_eq!(poll.options.iter().map(|o| o.votes).sum::<i64>(), 1);
            }
        })
    };

    flipper.await.unwrap();
    reader.await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_option_from_another_post_is_rejected(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (first_blog, _) = seed_poll(&pool, alice, &["A", "B"]).await;
    let (_, other_options) = seed_poll(&pool, alice, &["X", "Y"]).await;

    let err = PollRepo::upsert_vote(&pool, first_blog, other_options[0], alice, 1_700_000_200)
        .await
        .unwrap_err();
    assert!(launchpad_db::is_foreign_key_violation(&err));
    assert_eq!(PollRepo::count_votes_by(&pool, first_blog, alice).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_post_without_options_has_no_poll(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &[]).await;
    assert!(options.is_empty());

    let blog = BlogRepo::find_by_id(&pool, blog_id).await.unwrap().unwrap();
    assert!(!blog.is_poll);
    assert!(PollRepo::get_poll(&pool, blog_id, Some(alice)).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_viewer_has_no_vote(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["A", "B"]).await;
    PollRepo::upsert_vote(&pool, blog_id, options[0], alice, 1_700_000_200)
        .await
        .unwrap();

    let poll = PollRepo::get_poll(&pool, blog_id, None).await.unwrap().unwrap();
    assert_eq!(poll.my_vote_id, None);
    assert_eq!(poll.options[0].votes, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_post_cascades_to_votes(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let (blog_id, options) = seed_poll(&pool, alice, &["A", "B"]).await;
    PollRepo::upsert_vote(&pool, blog_id, options[0], bob, 1_700_000_200)
        .await
        .unwrap();

    assert!(!BlogRepo::delete_owned(&pool, blog_id, bob).await.unwrap(), "only the author may delete");
    assert!(BlogRepo::delete_owned(&pool, blog_id, alice).await.unwrap());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM poll_votes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
