//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Input DTOs carrying already-cleaned form data for inserts and updates
//! - Read models for joined queries where a handler needs more than one table

pub mod car;
pub mod dashboard;
pub mod driver;
pub mod manufacturer;
