//! Session-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use taxi_core::types::DbId;
use taxi_db::repositories::DriverRepo;

use crate::auth::session::SessionConfig;
use crate::error::AppError;
use crate::state::AppState;

/// The logged-in driver behind a request.
///
/// Use this as an extractor parameter in any handler that requires a login:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Rejects with [`AppError::LoginRequired`] when no live session is found or
/// the account behind it is gone or inactive.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    /// Plaintext session token (for per-session data and logout).
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Nested routers strip their prefix from `parts.uri`.
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0);
        let next = uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
        let login_required = || AppError::LoginRequired { next: next.clone() };

        let token = session_token(parts, &state.config.session).ok_or_else(login_required)?;

        let session = state.sessions.get(&token).await.ok_or_else(login_required)?;

        let driver = DriverRepo::find_by_id(&state.pool, session.user_id).await?;
        let driver = match driver {
            Some(driver) if driver.is_active => driver,
            _ => {
                state.sessions.destroy(&token).await;
                return Err(login_required());
            }
        };

        Ok(AuthUser {
            user_id: driver.id,
            username: driver.username,
            token,
        })
    }
}

/// Session token from the session cookie, else from `Authorization: Bearer`.
pub fn session_token(parts: &Parts, config: &SessionConfig) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(token) = config.read_token(&jar) {
        return Some(token);
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
