//! Input validation helpers
//!
//! Centralized length limits and validation functions shared by the
//! user and entity write paths.

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Length limits ───────────────────────────────────────────────────

/// Minimum password length, enforced at signup before hashing
pub const MIN_PASSWORD_LEN: usize = 8;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// PostalCode on Location
pub const MAX_POSTAL_CODE_LEN: usize = 12;

/// CountryId on Location (ISO 3166-1 alpha-2)
pub const MAX_COUNTRY_ID_LEN: usize = 2;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate email format.
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    if !value.validate_email() {
        return Err(AppError::validation(format!(
            "{field} is not correctly formatted"
        )));
    }
    if value.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation(format!("{field} is too long")));
    }
    Ok(())
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a signup/updated password before it is hashed.
pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if value.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("Password is too long".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format_is_enforced() {
        assert!(validate_email("sales.rep@example.com", "Email").is_ok());
        assert!(validate_email("not-an-email", "Email").is_err());
        assert!(validate_email("", "Email").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn optional_text_limit_only_applies_when_present() {
        assert!(validate_optional_text(&None, "PostalCode", 12).is_ok());
        assert!(validate_optional_text(&Some("28014".into()), "PostalCode", 12).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(13)), "PostalCode", 12).is_err());
    }
}
