//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the driver logged in through the session cookie.

pub mod auth;
