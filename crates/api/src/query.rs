//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page selection for list endpoints (`?page=N` or `?page=last`).
///
/// Kept as a raw string; [`taxi_core::pagination::Page::resolve`] decides
/// what is valid.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}
