use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::error::{handle_domain_error, handle_request_validation};

use ed_core::errors::{DomainError, TokenError};
use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};
use ed_shared::types::response::{ApiResponse, ErrorResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/reset-password
///
/// Redeems a single-use reset token (valid for one hour) and sets the
/// new password. A successful reset also clears the lockout counter.
/// Unknown, already-used and expired tokens all get the same generic
/// rejection.
pub async fn reset_password<R, P, E>(
    state: web::Data<AppState<R, P, E>>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    P: PasswordHasherTrait + 'static,
    E: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_request_validation(&errors);
    }

    match state
        .auth_service
        .reset_password(&request.token, &request.password)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "Password has been reset. You can now log in",
        )),
        Err(DomainError::NotFound { .. }) | Err(DomainError::Token(TokenError::TokenExpired)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_token",
                "The reset link is invalid or has expired",
            ))
        }
        Err(error) => handle_domain_error(&error),
    }
}
