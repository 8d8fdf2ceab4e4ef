//! First-account provisioning.
//!
//! Every endpoint except login needs a session, so a fresh deployment needs
//! one driver created out of band. When the `BOOTSTRAP_*` variables are set
//! the server creates that driver at startup unless the username is taken.

use taxi_core::license::LicenseNumber;
use taxi_db::models::driver::CreateDriver;
use taxi_db::repositories::DriverRepo;
use taxi_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Credentials of the driver to provision at startup.
#[derive(Debug, Clone)]
pub struct BootstrapDriver {
    pub username: String,
    pub password: String,
    pub license_number: LicenseNumber,
}

impl BootstrapDriver {
    /// Read `BOOTSTRAP_USERNAME`, `BOOTSTRAP_PASSWORD` and
    /// `BOOTSTRAP_LICENSE_NUMBER`. Returns `None` unless all three are set.
    ///
    /// # Panics
    ///
    /// Panics if `BOOTSTRAP_LICENSE_NUMBER` is not a valid license number.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("BOOTSTRAP_USERNAME").ok()?;
        let password = std::env::var("BOOTSTRAP_PASSWORD").ok()?;
        let license = std::env::var("BOOTSTRAP_LICENSE_NUMBER").ok()?;

        let license_number = LicenseNumber::parse(license.trim())
            .unwrap_or_else(|e| panic!("BOOTSTRAP_LICENSE_NUMBER is invalid: {e}"));

        Some(Self {
            username: username.trim().to_string(),
            password,
            license_number,
        })
    }
}

/// Create the bootstrap driver if no driver has its username yet.
///
/// Returns `true` if a driver was created.
pub async fn ensure_driver(pool: &DbPool, bootstrap: &BootstrapDriver) -> AppResult<bool> {
    if DriverRepo::find_by_username(pool, &bootstrap.username)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    let password_hash = hash_password(&bootstrap.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let driver = DriverRepo::create(
        pool,
        &CreateDriver {
            username: bootstrap.username.clone(),
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            license_number: bootstrap.license_number.clone(),
        },
    )
    .await?;

    tracing::info!(driver_id = driver.id, username = %driver.username, "Bootstrap driver created");
    Ok(true)
}
