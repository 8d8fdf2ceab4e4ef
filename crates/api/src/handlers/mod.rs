pub mod accounts;
pub mod car;
pub mod dashboard;
pub mod driver;
pub mod health;
pub mod manufacturer;
