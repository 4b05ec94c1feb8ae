use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{SignupRequest, SignupResponse};
use crate::handlers::error::{handle_domain_error, handle_request_validation};

use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};
use ed_shared::types::response::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// Registers a new account and sends the verification email. The account
/// starts unverified and cannot log in until the emailed link is
/// redeemed.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Alice",
///     "email": "alice@academy.example",
///     "phone": "+61412345678",
///     "password": "at-least-8-chars"
/// }
/// ```
///
/// # Errors
/// - 400 Bad Request: validation failure
/// - 409 Conflict: email or phone already registered
/// - 503 Service Unavailable: the account was created but the
///   verification email could not be sent
pub async fn signup<R, P, E>(
    state: web::Data<AppState<R, P, E>>,
    request: web::Json<SignupRequest>,
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
        .signup(
            &request.name,
            &request.email,
            &request.phone,
            &request.password,
        )
        .await
    {
        Ok(account) => HttpResponse::Created().json(ApiResponse::success(SignupResponse {
            account_id: account.id,
            email: account.email,
            message: "Account created. Check your email for the verification link".to_string(),
        })),
        Err(error) => handle_domain_error(&error),
    }
}
