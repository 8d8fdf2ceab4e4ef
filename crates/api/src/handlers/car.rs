//! Handlers for the `/cars` resource, including the driver toggle.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use taxi_core::error::CoreError;
use taxi_core::pagination::Page;
use taxi_core::types::DbId;
use taxi_db::models::car::{Car, CarSummary, DriverAssignment};
use taxi_db::models::driver::DriverResponse;
use taxi_db::models::manufacturer::ManufacturerSummary;
use taxi_db::repositories::{CarRepo, DriverRepo, ManufacturerRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, FormJson};
use crate::forms::CarForm;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse, SeeOther};
use crate::state::AppState;

const LIST_URL: &str = "/cars";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Car", id })
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A car with its manufacturer and every assigned driver.
#[derive(Debug, Serialize)]
pub struct CarDetail {
    pub id: DbId,
    pub model: String,
    pub display: String,
    pub manufacturer: ManufacturerSummary,
    pub drivers: Vec<DriverResponse>,
    /// Whether the requesting driver is assigned to this car.
    pub is_current_user_driver: bool,
}

/// One selectable option in a car form.
#[derive(Debug, Serialize)]
pub struct Choice {
    pub id: DbId,
    pub display: String,
}

/// Options for the car form's manufacturer select and driver multi-select.
#[derive(Debug, Serialize)]
pub struct CarChoices {
    pub manufacturers: Vec<Choice>,
    pub drivers: Vec<Choice>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /cars
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<CarSummary>>> {
    let count = CarRepo::count(&state.pool).await?;
    let page = Page::resolve(params.page.as_deref(), count)?;
    let rows = CarRepo::list_page(&state.pool, page.limit(), page.offset()).await?;
    let data = rows.into_iter().map(CarSummary::from).collect();
    Ok(Json(PageResponse { data, page }))
}

/// GET /cars/choices
pub async fn choices(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<CarChoices>>> {
    let manufacturers = ManufacturerRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .map(|m| Choice {
            id: m.id,
            display: m.to_string(),
        })
        .collect();

    let drivers = DriverRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .map(|d| Choice {
            id: d.id,
            display: d.to_string(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: CarChoices {
            manufacturers,
            drivers,
        },
    }))
}

/// GET /cars/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<Json<DataResponse<CarDetail>>> {
    let car = CarRepo::find_with_manufacturer(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let drivers: Vec<DriverResponse> = DriverRepo::list_for_car(&state.pool, id)
        .await?
        .into_iter()
        .map(DriverResponse::from)
        .collect();
    let is_current_user_driver = CarRepo::has_driver(&state.pool, id, user.user_id).await?;

    let summary = CarSummary::from(car);
    Ok(Json(DataResponse {
        data: CarDetail {
            id: summary.id,
            model: summary.model,
            display: summary.display,
            manufacturer: summary.manufacturer,
            drivers,
            is_current_user_driver,
        },
    }))
}

/// POST /cars
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    FormJson(form): FormJson<CarForm>,
) -> AppResult<SeeOther<Car>> {
    let input = form.clean_create()?;
    let car = CarRepo::create(&state.pool, &input).await?;

    tracing::info!(
        car_id = car.id,
        driver_count = input.driver_ids.len(),
        user_id = user.user_id,
        "Car created"
    );
    Ok(SeeOther::new(LIST_URL, car))
}

/// PUT /cars/{id}
///
/// Replaces the car's whole driver set with the submitted selection.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
    FormJson(form): FormJson<CarForm>,
) -> AppResult<SeeOther<Car>> {
    let input = form.clean_update()?;
    let car = CarRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        car_id = id,
        driver_count = input.driver_ids.len(),
        user_id = user.user_id,
        "Car updated"
    );
    Ok(SeeOther::new(LIST_URL, car))
}

/// DELETE /cars/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<SeeOther<serde_json::Value>> {
    if !CarRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(car_id = id, user_id = user.user_id, "Car deleted");
    Ok(SeeOther::new(LIST_URL, serde_json::json!({ "deleted": id })))
}

/// POST /cars/{id}/toggle-driver
///
/// Adds the requesting driver to the car, or removes them if already
/// assigned.
pub async fn toggle_driver(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<SeeOther<DriverAssignment>> {
    let assignment = CarRepo::toggle_driver(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        car_id = id,
        driver_id = user.user_id,
        assigned = assignment.assigned,
        "Toggled car driver"
    );
    Ok(SeeOther::new(format!("{LIST_URL}/{id}"), assignment))
}
