//! Driver entity model and DTOs.
//!
//! A driver is the user account itself: authentication columns and the
//! license number live on the same row.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;
use taxi_core::license::LicenseNumber;
use taxi_core::types::{DbId, Timestamp};

/// Full driver row from the `drivers` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`DriverResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Driver {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub license_number: String,
    pub last_login_at: Option<Timestamp>,
    pub date_joined: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.username, self.first_name, self.last_name)
    }
}

/// Safe driver representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct DriverResponse {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub license_number: String,
    pub last_login_at: Option<Timestamp>,
    pub date_joined: Timestamp,
    pub display: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        let display = driver.to_string();
        Self {
            id: driver.id,
            username: driver.username,
            first_name: driver.first_name,
            last_name: driver.last_name,
            email: driver.email,
            is_active: driver.is_active,
            license_number: driver.license_number,
            last_login_at: driver.last_login_at,
            date_joined: driver.date_joined,
            display,
        }
    }
}

/// DTO for registering a new driver.
#[derive(Debug, Clone)]
pub struct CreateDriver {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_number: LicenseNumber,
}
