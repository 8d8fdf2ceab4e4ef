//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- in-process session store and session cookie helpers.

pub mod password;
pub mod session;
