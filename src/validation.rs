use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AbookError, AbookResult};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-]{7,15}$").expect("Failed to compile phone regex"));

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
        .expect("Failed to compile email regex")
});

/// True iff the value is an optional leading `+` followed by 7-15 characters
/// drawn from digits, spaces, and hyphens.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// True iff the value is shaped like `local-part@domain.tld`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> AbookResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(AbookError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validates a phone number, returning it unchanged on success.
pub fn phone_number(value: &str) -> AbookResult<String> {
    if is_valid_phone(value) {
        Ok(value.to_string())
    } else {
        Err(AbookError::InvalidPhone {
            value: value.to_string(),
        })
    }
}

/// Validates an email address, returning it unchanged on success.
pub fn email_address(value: &str) -> AbookResult<String> {
    if is_valid_email(value) {
        Ok(value.to_string())
    } else {
        Err(AbookError::InvalidEmail {
            value: value.to_string(),
        })
    }
}
