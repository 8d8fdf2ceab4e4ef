//! Repository for the `drivers` table.

use sqlx::PgPool;
use taxi_core::license::LicenseNumber;
use taxi_core::types::DbId;

use crate::models::driver::{CreateDriver, Driver};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, first_name, last_name, email, is_active, \
                        license_number, last_login_at, date_joined, updated_at";

/// Provides CRUD operations for drivers.
pub struct DriverRepo;

impl DriverRepo {
    /// Insert a new driver, returning the created row.
    ///
    /// Duplicate usernames or license numbers fail with `uq_drivers_username`
    /// / `uq_drivers_license_number`.
    pub async fn create(pool: &PgPool, input: &CreateDriver) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (username, password_hash, first_name, last_name, email, license_number)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.license_number.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a driver by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a driver by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE username = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Total number of drivers.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM drivers")
            .fetch_one(pool)
            .await
    }

    /// One page of drivers in registration order.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Driver>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drivers
             ORDER BY id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every driver ordered by username (form choice list).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers ORDER BY username");
        sqlx::query_as::<_, Driver>(&query).fetch_all(pool).await
    }

    /// Drivers linked to a car.
    pub async fn list_for_car(pool: &PgPool, car_id: DbId) -> Result<Vec<Driver>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drivers
             WHERE id IN (SELECT driver_id FROM car_drivers WHERE car_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(car_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a driver's license number.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_license_number(
        pool: &PgPool,
        id: DbId,
        license_number: &LicenseNumber,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET license_number = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(license_number.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE drivers SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a driver. Car assignments are removed; the cars stay.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
