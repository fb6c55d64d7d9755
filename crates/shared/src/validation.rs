//! Common validation and normalization helpers.

use validator::{ValidateEmail, ValidationError};

/// Minimum length of a guest's full name (after trimming).
pub const MIN_FULL_NAME_LENGTH: usize = 3;

/// Minimum length of a phone number (after normalization).
pub const MIN_PHONE_LENGTH: usize = 10;

/// Strips everything from a phone number except digits and a leading `+`.
///
/// ```
/// use shared::validation::normalize_phone;
///
/// assert_eq!(normalize_phone(" +55 (11) 99999-0001 "), "+5511999990001");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_ascii_digit() || (c == '+' && normalized.is_empty()) {
            normalized.push(c);
        }
    }
    normalized
}

/// Trims an optional string, mapping blank values to `None`.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Returns true when `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    value.validate_email()
}

/// Validates that a full name has enough characters once trimmed.
pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() >= MIN_FULL_NAME_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("full_name_length");
        err.message = Some("Full name must have at least 3 characters".into());
        Err(err)
    }
}

/// Validates that a phone number has enough characters once trimmed.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().chars().count() >= MIN_PHONE_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_length");
        err.message = Some("Phone must have at least 10 digits".into());
        Err(err)
    }
}

/// Validates an optional email; blank values count as absent.
pub fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || is_valid_email(trimmed) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("Invalid email".into());
        Err(err)
    }
}

/// Validates a URL field: blank, or an absolute http(s) URL.
pub fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let trimmed = url.trim().to_ascii_lowercase();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("url_scheme");
        err.message = Some("URL must start with http:// or https://".into());
        Err(err)
    }
}
