//! Driver license-number format rule.
//!
//! A license number is exactly three upper-case latin letters followed by
//! five digits, e.g. `ABC12345`. The rule runs when forms are cleaned and
//! again at the persistence boundary: repository writes only accept a
//! [`LicenseNumber`], which can only be built through
//! [`validate_license_number`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Total length of a license number.
pub const LICENSE_NUMBER_LEN: usize = 8;

/// Number of leading letters; the remainder are digits.
const LETTER_PREFIX_LEN: usize = 3;

/// Why a candidate license number was rejected.
///
/// Checks run in declaration order and the first failure wins, so a value
/// that is both too short and badly formatted reports only its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LicenseNumberError {
    #[error("Your license number must contain digits and upper-case latin letters.")]
    NotAlphanumeric,

    #[error("Your license number must be 8 characters long.")]
    WrongLength,

    #[error("License number format must be: \"ABC12345\"")]
    BadFormat,
}

/// Check `candidate` against the license-number format.
///
/// Returns the input unchanged on success.
///
/// # Examples
///
/// ```
/// use taxi_core::license::{validate_license_number, LicenseNumberError};
///
/// assert_eq!(validate_license_number("ABC12345"), Ok("ABC12345"));
/// assert_eq!(validate_license_number("ABC1234"), Err(LicenseNumberError::WrongLength));
/// assert_eq!(validate_license_number("AB12345X"), Err(LicenseNumberError::BadFormat));
/// assert_eq!(validate_license_number("ABC-1234"), Err(LicenseNumberError::NotAlphanumeric));
/// ```
pub fn validate_license_number(candidate: &str) -> Result<&str, LicenseNumberError> {
    if candidate.is_empty() || !candidate.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(LicenseNumberError::NotAlphanumeric);
    }

    // Every byte is ASCII from here on, so byte length == char count and
    // splitting at a byte offset is always on a char boundary.
    if candidate.len() != LICENSE_NUMBER_LEN {
        return Err(LicenseNumberError::WrongLength);
    }

    let (letters, digits) = candidate.split_at(LETTER_PREFIX_LEN);
    if !letters.bytes().all(|b| b.is_ascii_uppercase())
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(LicenseNumberError::BadFormat);
    }

    Ok(candidate)
}

/// A license number that has passed [`validate_license_number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseNumber(String);

impl LicenseNumber {
    /// Validate and wrap a candidate license number.
    pub fn parse(candidate: impl Into<String>) -> Result<Self, LicenseNumberError> {
        let candidate = candidate.into();
        validate_license_number(&candidate)?;
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LicenseNumber {
    type Error = LicenseNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LicenseNumber> for String {
    fn from(value: LicenseNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for LicenseNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
