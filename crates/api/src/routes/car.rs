//! Route definitions for the `/cars` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::car;
use crate::state::AppState;

/// Routes mounted at `/cars`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /choices                 -> choices
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// POST   /{id}/toggle-driver      -> toggle_driver
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(car::list).post(car::create))
        .route("/choices", get(car::choices))
        .route(
            "/{id}",
            get(car::get_by_id).put(car::update).delete(car::delete),
        )
        .route("/{id}/toggle-driver", post(car::toggle_driver))
}
