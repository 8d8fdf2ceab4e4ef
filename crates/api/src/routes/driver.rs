//! Route definitions for the `/drivers` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::driver;
use crate::state::AppState;

/// Routes mounted at `/drivers`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// DELETE /{id}                    -> delete
/// PUT    /{id}/license            -> update_license
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(driver::list).post(driver::create))
        .route("/{id}", get(driver::get_by_id).delete(driver::delete))
        .route("/{id}/license", put(driver::update_license))
}
