//! Route definitions for `/accounts`.

use axum::routing::post;
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// POST   /login                   -> login
/// POST   /logout                  -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(accounts::login))
        .route("/logout", post(accounts::logout))
}
