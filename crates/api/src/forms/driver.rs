//! Driver registration and license-update forms.

use serde::Deserialize;
use taxi_core::form::FormErrors;
use taxi_core::license::LicenseNumber;
use validator::{Validate, ValidateEmail, ValidationError};

use super::{error, license_number_field, required_text};

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

const USERNAME_MESSAGE: &str = "Enter a valid username. This value may contain only letters, \
                                numbers, and @/./+/-/_ characters.";

/// Registration form for a new driver account.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DriverCreationForm {
    #[validate(custom(function = "username_field"))]
    pub username: String,
    #[validate(custom(function = "password_field"))]
    pub password1: String,
    #[validate(
        custom(function = "required_text"),
        must_match(other = "password1", message = "The two password fields didn't match.")
    )]
    pub password2: String,
    #[validate(custom(function = "license_number_field"))]
    pub license_number: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
    #[validate(custom(function = "optional_email"))]
    pub email: String,
}

/// A validated registration; the password is still plaintext.
#[derive(Debug, Clone)]
pub struct DriverRegistration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_number: LicenseNumber,
}

impl DriverCreationForm {
    pub fn clean(self) -> Result<DriverRegistration, FormErrors> {
        // Passwords are taken verbatim.
        let form = Self {
            username: self.username.trim().to_string(),
            license_number: self.license_number.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self
        };
        form.validate()?;

        let license_number = LicenseNumber::parse(form.license_number)
            .map_err(|e| FormErrors::single("license_number", e.to_string()))?;

        Ok(DriverRegistration {
            username: form.username,
            password: form.password1,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            license_number,
        })
    }
}

/// License-number change form. The only editable driver field.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DriverLicenseForm {
    #[validate(custom(function = "license_number_field"))]
    pub license_number: String,
}

impl DriverLicenseForm {
    pub fn clean(self) -> Result<LicenseNumber, FormErrors> {
        let form = Self {
            license_number: self.license_number.trim().to_string(),
        };
        form.validate()?;
        LicenseNumber::parse(form.license_number)
            .map_err(|e| FormErrors::single("license_number", e.to_string()))
    }
}

fn username_field(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;

    let len = value.chars().count();
    if len > USERNAME_MAX_LEN {
        return Err(error(
            "max_length",
            format!("Ensure this value has at most {USERNAME_MAX_LEN} characters (it has {len})."),
        ));
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(error("invalid_username", USERNAME_MESSAGE));
    }

    Ok(())
}

fn password_field(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Err(error(
            "password_too_short",
            format!(
                "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
            ),
        ));
    }
    Ok(())
}

fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(error("email", "Enter a valid email address."))
    }
}
