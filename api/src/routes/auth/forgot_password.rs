use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::ForgotPasswordRequest;
use crate::handlers::error::handle_request_validation;

use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};
use ed_shared::types::response::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/forgot-password
///
/// Starts the password-reset flow. The response is always the same
/// success shape, whether the email is registered or not; anything else
/// would let a caller enumerate accounts.
pub async fn forgot_password<R, P, E>(
    state: web::Data<AppState<R, P, E>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    P: PasswordHasherTrait + 'static,
    E: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_request_validation(&errors);
    }

    state
        .auth_service
        .request_password_reset(&request.email)
        .await;

    HttpResponse::Ok().json(ApiResponse::<()>::message(
        "If the email is registered, a password reset link has been sent",
    ))
}
