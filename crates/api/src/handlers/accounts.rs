//! Handlers for `/accounts` (login, logout).

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use taxi_core::error::CoreError;
use taxi_core::types::DbId;
use taxi_db::repositories::DriverRepo;

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult, LOGIN_URL};
use crate::extract::FormJson;
use crate::middleware::auth::AuthUser;
use crate::response::SeeOther;
use crate::state::AppState;

/// Request body for `POST /accounts/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Local path to continue to after login.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: DbId,
    pub username: String,
    /// Session token, also set as the session cookie.
    pub token: String,
}

/// Accept only same-site absolute paths as a post-login target.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

/// POST /accounts/login
///
/// Verifies the credentials, starts a fresh session and redirects to `next`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    FormJson(input): FormJson<LoginRequest>,
) -> AppResult<Response> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Please enter a correct username and password.".into(),
        ))
    };

    let driver = DriverRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &driver.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid || !driver.is_active {
        tracing::info!(username = %driver.username, "Rejected login attempt");
        return Err(invalid());
    }

    DriverRepo::record_login(&state.pool, driver.id).await?;
    let token = state.sessions.create(driver.id).await;

    tracing::info!(user_id = driver.id, username = %driver.username, "Driver logged in");

    let cookie = state.config.session.session_cookie(token.clone());
    let location = safe_next(input.next.as_deref()).to_string();
    let body = LoginResponse {
        user_id: driver.id,
        username: driver.username,
        token,
    };

    Ok((jar.add(cookie), SeeOther::new(location, body)).into_response())
}

/// POST /accounts/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth_user: AuthUser,
) -> Response {
    state.sessions.destroy(&auth_user.token).await;
    tracing::info!(user_id = auth_user.user_id, "Driver logged out");

    let cookie = state.config.session.removal_cookie();
    (
        jar.add(cookie),
        SeeOther::new(LOGIN_URL, serde_json::json!({ "logged_out": true })),
    )
        .into_response()
}
