//! Route definitions for the `/manufacturers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::manufacturer;
use crate::state::AppState;

/// Routes mounted at `/manufacturers`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(manufacturer::list).post(manufacturer::create))
        .route(
            "/{id}",
            get(manufacturer::get_by_id)
                .put(manufacturer::update)
                .delete(manufacturer::delete),
        )
}
