use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taxi_core::error::CoreError;
use taxi_core::form::FormErrors;
use taxi_core::license::LicenseNumberError;

/// Where unauthenticated requests are sent.
pub const LOGIN_URL: &str = "/accounts/login";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taxi_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A submitted form failed validation.
    #[error("Invalid form: {0}")]
    Form(#[from] FormErrors),

    /// The request addresses no resource, e.g. a malformed path id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No live session; the client is sent to the login page.
    #[error("Login required for {next}")]
    LoginRequired { next: String },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidPage(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            AppError::Database(err) => {
                if let Some(fields) = constraint_form_errors(err) {
                    return form_error_response(&fields);
                }
                classify_sqlx_error(err)
            }

            AppError::Form(fields) => return form_error_response(fields),

            AppError::LoginRequired { next } => return login_redirect(next),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn form_error_response(fields: &FormErrors) -> Response {
    let body = json!({
        "error": "The submitted form has errors",
        "code": "VALIDATION_ERROR",
        "fields": fields,
    });
    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}

fn login_redirect(next: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    let location = format!("{LOGIN_URL}?{query}");
    let location = HeaderValue::from_str(&location)
        .unwrap_or_else(|_| HeaderValue::from_static(LOGIN_URL));
    let body = json!({
        "error": "Authentication required",
        "code": "LOGIN_REQUIRED",
    });
    (
        StatusCode::SEE_OTHER,
        [(LOCATION, location)],
        axum::Json(body),
    )
        .into_response()
}

/// Form field and message owning each named constraint.
fn constraint_field(constraint: &str) -> Option<(&'static str, String)> {
    let entry = match constraint {
        "uq_manufacturers_name" => ("name", "Manufacturer with this Name already exists.".into()),
        "uq_drivers_username" => ("username", "A user with that username already exists.".into()),
        "uq_drivers_license_number" => (
            "license_number",
            "Driver with this License number already exists.".into(),
        ),
        "ck_drivers_license_number_format" => {
            ("license_number", LicenseNumberError::BadFormat.to_string())
        }
        "fk_cars_manufacturer" => (
            "manufacturer_id",
            "Select a valid choice. That choice is not one of the available choices.".into(),
        ),
        "fk_car_drivers_driver" => (
            "drivers",
            "Select a valid choice. One of the selected drivers is not one of the available choices."
                .into(),
        ),
        _ => return None,
    };
    Some(entry)
}

/// Translate a violation of a known constraint into form errors.
///
/// - 23505 unique violation
/// - 23514 check violation
/// - 23503 foreign key violation
fn constraint_form_errors(err: &sqlx::Error) -> Option<FormErrors> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    match db_err.code().as_deref() {
        Some("23505" | "23514" | "23503") => {}
        _ => return None,
    }
    let (field, message) = constraint_field(db_err.constraint()?)?;
    Some(FormErrors::single(field, message))
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
