use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::VerifyEmailRequest;
use crate::handlers::error::{handle_domain_error, handle_request_validation};

use ed_core::errors::DomainError;
use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};
use ed_shared::types::response::{ApiResponse, ErrorResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/verify-email
///
/// Redeems a single-use verification token. A second redemption of the
/// same token misses the lookup and receives the same generic response
/// as a token that never existed.
pub async fn verify_email<R, P, E>(
    state: web::Data<AppState<R, P, E>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    P: PasswordHasherTrait + 'static,
    E: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_request_validation(&errors);
    }

    match state.auth_service.verify_email(&request.token).await {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "Email verified. You can now log in",
        )),
        // lookup miss stays generic: used, mistyped and fabricated tokens
        // are indistinguishable
        Err(DomainError::NotFound { .. }) => HttpResponse::BadRequest().json(
            ErrorResponse::new("invalid_token", "The verification link is invalid"),
        ),
        Err(error) => handle_domain_error(&error),
    }
}
