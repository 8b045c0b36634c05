//! Authentication primitives.
//!
//! - [`password`] -- Argon2id credential hashing bound to the account's creation time.
//! - [`session`] -- the in-memory session store mapping opaque tokens to identities.

pub mod password;
pub mod session;
