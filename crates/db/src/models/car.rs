//! Car entity model, driver-assignment types and read models.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;
use taxi_core::types::{DbId, Timestamp};

use crate::models::manufacturer::ManufacturerSummary;

/// A row from the `cars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Car {
    pub id: DbId,
    pub model: String,
    pub manufacturer_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}

/// A car joined with its manufacturer, as selected by list queries.
#[derive(Debug, Clone, FromRow)]
pub struct CarWithManufacturerRow {
    pub id: DbId,
    pub model: String,
    pub manufacturer_id: DbId,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

/// API shape of [`CarWithManufacturerRow`].
#[derive(Debug, Clone, Serialize)]
pub struct CarSummary {
    pub id: DbId,
    pub model: String,
    pub display: String,
    pub manufacturer: ManufacturerSummary,
}

impl From<CarWithManufacturerRow> for CarSummary {
    fn from(row: CarWithManufacturerRow) -> Self {
        Self {
            id: row.id,
            display: row.model.clone(),
            model: row.model,
            manufacturer: ManufacturerSummary {
                id: row.manufacturer_id,
                name: row.manufacturer_name,
                country: row.manufacturer_country,
            },
        }
    }
}

/// DTO for creating a car together with its initial driver set.
#[derive(Debug, Clone)]
pub struct CreateCar {
    pub model: String,
    pub manufacturer_id: DbId,
    /// May be empty; a car needs no drivers.
    pub driver_ids: Vec<DbId>,
}

/// DTO for updating a car. The driver set is replaced wholesale.
#[derive(Debug, Clone)]
pub struct UpdateCar {
    pub model: String,
    pub manufacturer_id: DbId,
    pub driver_ids: Vec<DbId>,
}

/// Result of toggling a driver on a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriverAssignment {
    pub car_id: DbId,
    pub driver_id: DbId,
    /// `true` if the driver is linked to the car after the toggle.
    pub assigned: bool,
}
