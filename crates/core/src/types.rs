/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Whole seconds since the Unix epoch (UTC).
///
/// Account creation times are mixed into password hashes, so they are kept
/// at whole-second precision to survive a database round trip unchanged.
pub type EpochSecs = i64;

/// Current time as [`EpochSecs`].
pub fn now_secs() -> EpochSecs {
    chrono::Utc::now().timestamp()
}
