//! Request extractors that resolve the caller's session.
//!
//! - [`session::MaybeSession`] -- the caller's session, if any. Never rejects.
//! - [`session::RequireSession`] -- rejects with 401 when there is no live session.

pub mod session;
