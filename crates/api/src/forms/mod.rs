//! Input forms for the mutating endpoints.
//!
//! Each form names its fields explicitly; unknown JSON keys are ignored and
//! missing keys default to empty so that "required" is reported as a field
//! error rather than a deserialization failure. `clean()` trims text input,
//! runs the `validator` derive and returns either the typed DTO handed to
//! the repository layer or a [`FormErrors`](taxi_core::form::FormErrors) map.

pub mod car;
pub mod driver;
pub mod manufacturer;

use std::borrow::Cow;

use taxi_core::form::REQUIRED_MESSAGE;
use taxi_core::license::validate_license_number;
use validator::ValidationError;

pub use car::CarForm;
pub use driver::{DriverCreationForm, DriverLicenseForm, DriverRegistration};
pub use manufacturer::ManufacturerForm;

pub(crate) fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Non-blank text.
pub(crate) fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Required field holding a well-formed license number.
pub(crate) fn license_number_field(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    validate_license_number(value)
        .map(|_| ())
        .map_err(|e| error("license_number", e.to_string()))
}
