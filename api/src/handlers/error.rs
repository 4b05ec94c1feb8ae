//! Domain-error to HTTP response mapping.
//!
//! Every handler funnels its `DomainError` through here. The mapping is
//! deliberately lossy: lookup misses and internal failures collapse into
//! generic messages, so the response body never reveals which accounts or
//! tokens exist.

use actix_web::HttpResponse;
use serde_json::json;
use std::collections::HashMap;
use validator::ValidationErrors;

use ed_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use ed_shared::types::response::ErrorResponse;

/// Convert a domain error into an HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),

        DomainError::Token(token_error) => handle_token_error(token_error),

        DomainError::ValidationErr(validation_error) => {
            handle_validation_error(validation_error)
        }

        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", message.clone()),
        ),

        DomainError::NotFound { resource } => {
            log::debug!("lookup miss: {resource}");
            HttpResponse::NotFound().json(ErrorResponse::new(
                "not_found",
                "The requested resource was not found",
            ))
        }

        DomainError::Internal { message } => {
            log::error!("internal error: {message}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "unexpected_error",
                "An unexpected error occurred",
            ))
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(
            // identical wording for unknown identifier and wrong password
            ErrorResponse::new("invalid_credentials", "Invalid email/phone or password"),
        ),
        AuthError::AccountLocked => HttpResponse::Forbidden().json(ErrorResponse::new(
            "account_locked",
            "Account temporarily locked after too many failed attempts. Try again later",
        )),
        AuthError::AccountNotVerified => HttpResponse::Forbidden().json(ErrorResponse::new(
            "account_not_verified",
            "Please verify your email address before logging in",
        )),
        AuthError::EmailAlreadyRegistered => HttpResponse::Conflict().json(ErrorResponse::new(
            "email_already_registered",
            "An account with this email already exists",
        )),
        AuthError::PhoneAlreadyRegistered => HttpResponse::Conflict().json(ErrorResponse::new(
            "phone_already_registered",
            "An account with this phone number already exists",
        )),
        AuthError::SessionExpired => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "session_expired",
            "Your session has expired. Please log in again",
        )),
        AuthError::EmailDispatchFailed => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::new(
                "email_dispatch_failed",
                "The email could not be sent. Please try again later",
            ),
        ),
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    match error {
        TokenError::TokenGenerationFailed => {
            log::error!("session token generation failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "unexpected_error",
                "An unexpected error occurred",
            ))
        }
        // expired, malformed and tampered tokens are indistinguishable
        // to the client
        _ => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "invalid_token",
            "The token is invalid or has expired",
        )),
    }
}

fn handle_validation_error(error: &ValidationError) -> HttpResponse {
    let field = match error {
        ValidationError::RequiredField { field } => field.clone(),
        ValidationError::InvalidFormat { field } => field.clone(),
        ValidationError::InvalidEmail => "email".to_string(),
        ValidationError::InvalidPhone => "phone".to_string(),
        ValidationError::PasswordTooShort { .. } => "password".to_string(),
    };

    let mut details = HashMap::new();
    details.insert(field, json!(error.to_string()));

    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_error", "Request validation failed")
            .with_details(details),
    )
}

/// Convert `validator` derive failures into the same 400 shape as the
/// domain validation errors
pub fn handle_request_validation(errors: &ValidationErrors) -> HttpResponse {
    let details: HashMap<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}"))
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_error", "Request validation failed")
            .with_details(details),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let resp = handle_domain_error(&AuthError::InvalidCredentials.into());
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_account_locked_maps_to_403() {
        let resp = handle_domain_error(&AuthError::AccountLocked.into());
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_is_generic() {
        let resp = handle_domain_error(&DomainError::Internal {
            message: "connection refused to db host 10.0.0.3".to_string(),
        });
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_expired_and_malformed_tokens_look_the_same() {
        let expired = handle_domain_error(&TokenError::TokenExpired.into());
        let malformed = handle_domain_error(&TokenError::InvalidTokenFormat.into());
        assert_eq!(expired.status(), malformed.status());
    }
}
