use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taxi_db::DbPool,
    /// Server configuration (cookie settings are read by the auth handlers).
    pub config: Arc<ServerConfig>,
    /// Live login sessions.
    pub sessions: Arc<SessionStore>,
}
