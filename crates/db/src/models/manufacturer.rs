//! Manufacturer entity model and DTOs.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;
use taxi_core::types::{DbId, Timestamp};

/// A row from the `manufacturers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Manufacturer {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

/// Manufacturer columns embedded in car read models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManufacturerSummary {
    pub id: DbId,
    pub name: String,
    pub country: String,
}

/// DTO for creating a new manufacturer.
#[derive(Debug, Clone)]
pub struct CreateManufacturer {
    pub name: String,
    pub country: String,
}

/// DTO for updating a manufacturer. Both fields are replaced.
#[derive(Debug, Clone)]
pub struct UpdateManufacturer {
    pub name: String,
    pub country: String,
}
