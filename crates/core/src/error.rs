/// Domain-level failures that reach the error channel.
///
/// Expected outcomes such as bad input or a wrong password are not errors in
/// this system; business methods report those as `false` or `None`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
