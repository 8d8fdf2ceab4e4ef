//! Repository for the `manufacturers` table.

use sqlx::PgPool;
use taxi_core::types::DbId;

use crate::models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, country, created_at, updated_at";

/// Provides CRUD operations for manufacturers.
pub struct ManufacturerRepo;

impl ManufacturerRepo {
    /// Insert a new manufacturer, returning the created row.
    ///
    /// A duplicate name fails with the `uq_manufacturers_name` constraint.
    pub async fn create(
        pool: &PgPool,
        input: &CreateManufacturer,
    ) -> Result<Manufacturer, sqlx::Error> {
        let query = format!(
            "INSERT INTO manufacturers (name, country)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Find a manufacturer by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers WHERE id = $1");
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of manufacturers.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers")
            .fetch_one(pool)
            .await
    }

    /// One page of manufacturers ordered by name.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Manufacturer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manufacturers
             ORDER BY name, id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every manufacturer ordered by name (form choice list).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers ORDER BY name, id");
        sqlx::query_as::<_, Manufacturer>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace a manufacturer's fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManufacturer,
    ) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!(
            "UPDATE manufacturers SET name = $2, country = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_optional(pool)
            .await
    }

    /// Delete a manufacturer. Its cars go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
