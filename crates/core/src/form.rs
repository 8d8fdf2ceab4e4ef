//! Field-level error collection for input forms.
//!
//! Forms report every failing field at once as a `field -> [message]` map so
//! the client can redisplay the whole form. Errors from `validator` derives,
//! from hand-written checks and from translated database constraints all end
//! up in the same [`FormErrors`] value.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Message reported for a missing or blank required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Key for errors that belong to the submission as a whole.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Maximum length of the plain text columns (`VARCHAR(255)`).
pub const CHAR_FIELD_MAX_LEN: usize = 255;

/// Ordered `field -> messages` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error map holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append `message` to the messages for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Names of all fields with at least one error.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when no errors were collected, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                form_errors.add(field.to_string(), message);
            }
        }
        form_errors
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// `validator` custom rule for required text columns: non-blank and at most
/// [`CHAR_FIELD_MAX_LEN`] characters.
pub fn char_field(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("required", REQUIRED_MESSAGE.into()));
    }

    let len = value.chars().count();
    if len > CHAR_FIELD_MAX_LEN {
        return Err(with_message(
            "max_length",
            format!(
                "Ensure this value has at most {CHAR_FIELD_MAX_LEN} characters (it has {len})."
            )
            .into(),
        ));
    }

    Ok(())
}

fn with_message(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message);
    error
}
