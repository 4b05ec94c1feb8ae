//! Domain-specific error types for authentication and related operations
//!
//! These enums give callers an explicit failure category to match on.
//! How much of the category leaks to the client is decided at the API
//! boundary: enumeration-sensitive paths collapse several variants into
//! one generic message there.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identifier or wrong password. The two cases are deliberately
    /// indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account locked")]
    AccountLocked,

    #[error("Account not verified")]
    AccountNotVerified,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Phone already registered")]
    PhoneAlreadyRegistered,

    #[error("Session expired")]
    SessionExpired,

    /// The account was persisted but the verification or reset email
    /// could not be dispatched
    #[error("Email dispatch failed")]
    EmailDispatchFailed,
}

/// Session and single-use token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors, surfaced per-field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid phone")]
    InvalidPhone,

    #[error("Password too short (minimum {min} characters)")]
    PasswordTooShort { min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(AuthError::AccountLocked.to_string(), "Account locked");
    }

    #[test]
    fn test_validation_error_includes_field() {
        let error = ValidationError::InvalidFormat {
            field: "phone".to_string(),
        };
        assert!(error.to_string().contains("phone"));
    }

    #[test]
    fn test_password_length_in_message() {
        let error = ValidationError::PasswordTooShort { min: 8 };
        assert!(error.to_string().contains('8'));
    }
}
