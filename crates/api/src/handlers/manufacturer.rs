//! Handlers for the `/manufacturers` resource.

use axum::extract::{Query, State};
use axum::Json;
use taxi_core::error::CoreError;
use taxi_core::pagination::Page;
use taxi_core::types::DbId;
use taxi_db::models::manufacturer::Manufacturer;
use taxi_db::repositories::ManufacturerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, FormJson};
use crate::forms::ManufacturerForm;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse, SeeOther};
use crate::state::AppState;

const LIST_URL: &str = "/manufacturers";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Manufacturer",
        id,
    })
}

/// GET /manufacturers
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<Manufacturer>>> {
    let count = ManufacturerRepo::count(&state.pool).await?;
    let page = Page::resolve(params.page.as_deref(), count)?;
    let data = ManufacturerRepo::list_page(&state.pool, page.limit(), page.offset()).await?;
    Ok(Json(PageResponse { data, page }))
}

/// GET /manufacturers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<Json<DataResponse<Manufacturer>>> {
    let manufacturer = ManufacturerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: manufacturer }))
}

/// POST /manufacturers
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    FormJson(form): FormJson<ManufacturerForm>,
) -> AppResult<SeeOther<Manufacturer>> {
    let input = form.clean_create()?;
    let manufacturer = ManufacturerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        manufacturer_id = manufacturer.id,
        user_id = user.user_id,
        "Manufacturer created"
    );
    Ok(SeeOther::new(LIST_URL, manufacturer))
}

/// PUT /manufacturers/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
    FormJson(form): FormJson<ManufacturerForm>,
) -> AppResult<SeeOther<Manufacturer>> {
    let input = form.clean_update()?;
    let manufacturer = ManufacturerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(manufacturer_id = id, user_id = user.user_id, "Manufacturer updated");
    Ok(SeeOther::new(LIST_URL, manufacturer))
}

/// DELETE /manufacturers/{id}
///
/// Cars made by this manufacturer are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<SeeOther<serde_json::Value>> {
    if !ManufacturerRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(manufacturer_id = id, user_id = user.user_id, "Manufacturer deleted");
    Ok(SeeOther::new(LIST_URL, serde_json::json!({ "deleted": id })))
}
