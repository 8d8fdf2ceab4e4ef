//! Read model for the dashboard totals.

use serde::Serialize;
use sqlx::FromRow;

/// Row counts of the three top-level tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct EntityCounts {
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
}
