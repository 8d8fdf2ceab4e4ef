//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope; paginated lists add a `page`
//! object. Successful form submissions answer `303 See Other` pointing at
//! the page the client should load next.

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use taxi_core::pagination::Page;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "page": {...} }` envelope for paginated lists.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: Page,
}

/// A `303 See Other` to `location` carrying `data` as the body.
#[derive(Debug)]
pub struct SeeOther<T: Serialize> {
    pub location: String,
    pub data: T,
}

impl<T: Serialize> SeeOther<T> {
    pub fn new(location: impl Into<String>, data: T) -> Self {
        Self {
            location: location.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for SeeOther<T> {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.location) {
            Ok(location) => (
                StatusCode::SEE_OTHER,
                [(LOCATION, location)],
                Json(DataResponse { data: self.data }),
            )
                .into_response(),
            Err(e) => {
                tracing::error!(location = %self.location, error = %e, "Invalid redirect target");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
