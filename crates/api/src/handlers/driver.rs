//! Handlers for the `/drivers` resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use taxi_core::error::CoreError;
use taxi_core::pagination::Page;
use taxi_core::types::DbId;
use taxi_db::models::car::CarSummary;
use taxi_db::models::driver::{CreateDriver, DriverResponse};
use taxi_db::repositories::{CarRepo, DriverRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, FormJson};
use crate::forms::{DriverCreationForm, DriverLicenseForm};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse, SeeOther};
use crate::state::AppState;

const LIST_URL: &str = "/drivers";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Driver",
        id,
    })
}

fn detail_url(id: DbId) -> String {
    format!("{LIST_URL}/{id}")
}

/// A driver with every car they are assigned to.
#[derive(Debug, Serialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: DriverResponse,
    pub cars: Vec<CarSummary>,
}

/// GET /drivers
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<DriverResponse>>> {
    let count = DriverRepo::count(&state.pool).await?;
    let page = Page::resolve(params.page.as_deref(), count)?;
    let rows = DriverRepo::list_page(&state.pool, page.limit(), page.offset()).await?;
    let data = rows.into_iter().map(DriverResponse::from).collect();
    Ok(Json(PageResponse { data, page }))
}

/// GET /drivers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<Json<DataResponse<DriverDetail>>> {
    let driver = DriverRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let cars = CarRepo::list_for_driver(&state.pool, id)
        .await?
        .into_iter()
        .map(CarSummary::from)
        .collect();

    Ok(Json(DataResponse {
        data: DriverDetail {
            driver: DriverResponse::from(driver),
            cars,
        },
    }))
}

/// POST /drivers
///
/// Registers a new driver account.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    FormJson(form): FormJson<DriverCreationForm>,
) -> AppResult<SeeOther<DriverResponse>> {
    let registration = form.clean()?;

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateDriver {
        username: registration.username,
        password_hash,
        first_name: registration.first_name,
        last_name: registration.last_name,
        email: registration.email,
        license_number: registration.license_number,
    };
    let driver = DriverRepo::create(&state.pool, &input).await?;

    tracing::info!(
        driver_id = driver.id,
        username = %driver.username,
        user_id = user.user_id,
        "Driver registered"
    );
    Ok(SeeOther::new(detail_url(driver.id), DriverResponse::from(driver)))
}

/// PUT /drivers/{id}/license
pub async fn update_license(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
    FormJson(form): FormJson<DriverLicenseForm>,
) -> AppResult<SeeOther<DriverResponse>> {
    let license_number = form.clean()?;
    let driver = DriverRepo::update_license_number(&state.pool, id, &license_number)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(driver_id = id, user_id = user.user_id, "Driver license number updated");
    Ok(SeeOther::new(detail_url(id), DriverResponse::from(driver)))
}

/// DELETE /drivers/{id}
///
/// The driver's cars stay; only the assignments go. Any sessions the driver
/// holds end with the account.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<SeeOther<serde_json::Value>> {
    if !DriverRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let sessions_ended = state.sessions.destroy_all_for_user(id).await;

    tracing::info!(
        driver_id = id,
        user_id = user.user_id,
        sessions_ended,
        "Driver deleted"
    );
    Ok(SeeOther::new(LIST_URL, serde_json::json!({ "deleted": id })))
}
