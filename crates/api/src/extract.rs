//! Request extractors whose rejections use the service's error documents.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use taxi_core::form::{FormErrors, NON_FIELD_ERRORS};
use taxi_core::types::DbId;

use crate::error::AppError;

/// JSON form body.
///
/// A body that is not JSON, has the wrong shape or is sent without
/// `Content-Type: application/json` is reported as a form error under
/// [`NON_FIELD_ERRORS`] instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct FormJson<T>(pub T);

impl<T, S> FromRequest<S> for FormJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Form(FormErrors::single(NON_FIELD_ERRORS, rejection.body_text()))
    }
}

/// Integer primary key from the `{id}` path segment.
///
/// Anything that is not an integer cannot name a row, so it is a 404 like
/// an unknown id.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}
