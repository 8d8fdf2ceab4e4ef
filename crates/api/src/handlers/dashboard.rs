//! Handler for the dashboard at `/`.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use taxi_db::repositories::DashboardRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
    /// Dashboard views in the current session, this one included.
    pub num_visits: u64,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let num_visits = state
        .sessions
        .increment_visits(&auth_user.token)
        .await
        .ok_or_else(|| AppError::LoginRequired { next: "/".into() })?;

    let counts = DashboardRepo::counts(&state.pool).await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            num_drivers: counts.num_drivers,
            num_cars: counts.num_cars,
            num_manufacturers: counts.num_manufacturers,
            num_visits,
        },
    }))
}
