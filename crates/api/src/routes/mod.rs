pub mod accounts;
pub mod car;
pub mod driver;
pub mod health;
pub mod manufacturer;

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Build the application route tree.
///
/// Every route except `/accounts/login` requires a session; requests
/// without one are redirected to the login page.
///
/// ```text
/// /accounts/login                        login (public)
/// /accounts/logout                       logout
///
/// /                                      dashboard
///
/// /manufacturers                         list, create
/// /manufacturers/{id}                    get, update, delete
///
/// /cars                                  list, create
/// /cars/choices                          form choice lists
/// /cars/{id}                             get, update, delete
/// /cars/{id}/toggle-driver               add/remove current driver (POST)
///
/// /drivers                               list, register
/// /drivers/{id}                          get, delete
/// /drivers/{id}/license                  update license number (PUT)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/accounts", accounts::router())
        .nest("/manufacturers", manufacturer::router())
        .nest("/cars", car::router())
        .nest("/drivers", driver::router())
}
