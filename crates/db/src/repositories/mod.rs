//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blog_repo;
pub mod follow_repo;
pub mod founder_repo;
pub mod poll_repo;
pub mod startup_repo;
pub mod user_repo;

pub use blog_repo::BlogRepo;
pub use follow_repo::FollowRepo;
pub use founder_repo::FounderRepo;
pub use poll_repo::PollRepo;
pub use startup_repo::StartupRepo;
pub use user_repo::UserRepo;
