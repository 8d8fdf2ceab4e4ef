//! Aggregate queries backing the dashboard.

use sqlx::PgPool;

use crate::models::dashboard::EntityCounts;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Count drivers, cars and manufacturers in one round trip.
    pub async fn counts(pool: &PgPool) -> Result<EntityCounts, sqlx::Error> {
        sqlx::query_as::<_, EntityCounts>(
            "SELECT
                (SELECT COUNT(*) FROM drivers) AS num_drivers,
                (SELECT COUNT(*) FROM cars) AS num_cars,
                (SELECT COUNT(*) FROM manufacturers) AS num_manufacturers",
        )
        .fetch_one(pool)
        .await
    }
}
