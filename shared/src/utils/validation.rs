//! Input-format validation helpers
//!
//! Format checks used at the API boundary before a request reaches the
//! business logic. Anything failing here is a `validation_error`, never a
//! credential failure.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("valid phone regex"));

/// Normalize an email address: trim whitespace, lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check email format (after normalization)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Check phone format: optional leading `+`, 8-15 digits
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// Whether an identifier submitted at login looks like an email rather
/// than a phone number
pub fn looks_like_email(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Minimum password length enforced at signup and reset
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check password strength: length only, the hash layer handles the rest
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
}
