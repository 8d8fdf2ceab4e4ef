//! Domain building blocks for the taxi service.
//!
//! Everything here is pure: no database or HTTP types, so the rules can be
//! exercised directly from unit tests and reused by every layer above.

pub mod error;
pub mod form;
pub mod license;
pub mod pagination;
pub mod types;
