/// Input validators
///
/// Request-level checks that run before anything reaches storage:
/// 1. Email format and length
/// 2. Chirp length
/// 3. Listing parameters (sort order, author id)

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
pub const MAX_CHIRP_LENGTH: usize = 140;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email regex is valid");
}

/// Validates an email address and returns it trimmed
pub fn is_valid_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("email".to_string()));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email".to_string(), MAX_EMAIL_LENGTH));
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("email".to_string()));
    }

    Ok(trimmed.to_string())
}

/// Rejects chirps longer than 140 characters
pub fn validate_chirp_body(body: &str) -> Result<(), ValidationError> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong("chirp".to_string(), MAX_CHIRP_LENGTH));
    }
    Ok(())
}

/// Listing order for chirps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Parses the optional `sort` query parameter; absent or empty means ascending
pub fn parse_sort_order(raw: Option<&str>) -> Result<SortOrder, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") | Some("asc") => Ok(SortOrder::Asc),
        Some("desc") => Ok(SortOrder::Desc),
        Some(other) => Err(ValidationError::InvalidValue(
            "sort".to_string(),
            format!("'{}' must be either 'asc' or 'desc'", other),
        )),
    }
}

/// Parses a UUID from a path segment or query parameter
pub fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidFormat(field.to_string()))
}
