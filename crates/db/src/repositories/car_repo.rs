//! Repository for the `cars` table and the `car_drivers` join table.

use sqlx::{PgConnection, PgPool};
use taxi_core::types::DbId;

use crate::models::car::{Car, CarWithManufacturerRow, CreateCar, DriverAssignment, UpdateCar};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, model, manufacturer_id, created_at, updated_at";

/// Car columns joined with the owning manufacturer.
const JOINED_COLUMNS: &str = "c.id, c.model, c.manufacturer_id, \
                              m.name AS manufacturer_name, m.country AS manufacturer_country";

/// Provides CRUD operations for cars and their driver assignments.
pub struct CarRepo;

impl CarRepo {
    /// Insert a car and its initial driver set in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateCar) -> Result<Car, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO cars (model, manufacturer_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let car = sqlx::query_as::<_, Car>(&query)
            .bind(&input.model)
            .bind(input.manufacturer_id)
            .fetch_one(&mut *tx)
            .await?;

        replace_drivers(&mut *tx, car.id, &input.driver_ids).await?;

        tx.commit().await?;
        Ok(car)
    }

    /// Find a car together with its manufacturer.
    pub async fn find_with_manufacturer(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarWithManufacturerRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM cars c
             JOIN manufacturers m ON m.id = c.manufacturer_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CarWithManufacturerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of cars.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(pool)
            .await
    }

    /// One page of cars joined with their manufacturers.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CarWithManufacturerRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM cars c
             JOIN manufacturers m ON m.id = c.manufacturer_id
             ORDER BY c.id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CarWithManufacturerRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Cars assigned to a driver, joined with their manufacturers.
    pub async fn list_for_driver(
        pool: &PgPool,
        driver_id: DbId,
    ) -> Result<Vec<CarWithManufacturerRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM cars c
             JOIN manufacturers m ON m.id = c.manufacturer_id
             JOIN car_drivers cd ON cd.car_id = c.id
             WHERE cd.driver_id = $1
             ORDER BY c.id"
        );
        sqlx::query_as::<_, CarWithManufacturerRow>(&query)
            .bind(driver_id)
            .fetch_all(pool)
            .await
    }

    /// Whether `driver_id` is assigned to `car_id`.
    pub async fn has_driver(
        pool: &PgPool,
        car_id: DbId,
        driver_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM car_drivers WHERE car_id = $1 AND driver_id = $2)",
        )
        .bind(car_id)
        .bind(driver_id)
        .fetch_one(pool)
        .await
    }

    /// Replace a car's fields and its whole driver set in one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCar,
    ) -> Result<Option<Car>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE cars SET model = $2, manufacturer_id = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(car) = sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(&input.model)
            .bind(input.manufacturer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        replace_drivers(&mut *tx, car.id, &input.driver_ids).await?;

        tx.commit().await?;
        Ok(Some(car))
    }

    /// Delete a car and its driver assignments.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add `driver_id` to the car's drivers if absent, remove it if present.
    ///
    /// Returns `None` if the car does not exist. Only `car_drivers` is
    /// touched; the car row is locked for the duration so concurrent toggles
    /// on the same car apply one after the other.
    pub async fn toggle_driver(
        pool: &PgPool,
        car_id: DbId,
        driver_id: DbId,
    ) -> Result<Option<DriverAssignment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> = sqlx::query_scalar("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
            .bind(car_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM car_drivers WHERE car_id = $1 AND driver_id = $2")
            .bind(car_id)
            .bind(driver_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !removed {
            sqlx::query("INSERT INTO car_drivers (car_id, driver_id) VALUES ($1, $2)")
                .bind(car_id)
                .bind(driver_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Some(DriverAssignment {
            car_id,
            driver_id,
            assigned: !removed,
        }))
    }
}

/// Overwrite the driver set of `car_id` with `driver_ids`.
///
/// An unknown driver id fails with `fk_car_drivers_driver`.
async fn replace_drivers(
    conn: &mut PgConnection,
    car_id: DbId,
    driver_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM car_drivers WHERE car_id = $1")
        .bind(car_id)
        .execute(&mut *conn)
        .await?;

    if driver_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO car_drivers (car_id, driver_id)
         SELECT $1, UNNEST($2::BIGINT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(car_id)
    .bind(driver_ids)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(car_id, driver_count = driver_ids.len(), "Replaced car drivers");
    Ok(())
}
