//! Shared response envelope for API handlers.
//!
//! Every method that returns a value wraps it as `{ "data": ... }`, including
//! `bool` results and `null` for absent values. Methods with nothing to
//! return answer `204 No Content`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: blog_id }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
