use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::config::Config;
use crate::dto::auth::{LoginRequest, LoginSuccessResponse};
use crate::handlers::error::{handle_domain_error, handle_request_validation};
use crate::middleware::session::session_cookies;

use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{AuthService, EmailServiceTrait, PasswordHasherTrait};
use ed_core::services::SessionService;
use ed_shared::types::response::ApiResponse;

/// Application state shared by all handlers
pub struct AppState<R, P, E>
where
    R: AccountRepository,
    P: PasswordHasherTrait,
    E: EmailServiceTrait,
{
    pub auth_service: Arc<AuthService<R, P, E>>,
    pub session_service: Arc<SessionService>,
    pub config: Config,
}

/// Handler for POST /api/v1/auth/login
///
/// Verifies the credentials and starts a session. The signed session
/// token and the last-activity timestamp are set as `httpOnly` cookies;
/// the body carries only the account summary.
///
/// # Request Body
///
/// ```json
/// {
///     "identifier": "admin@academy.example",
///     "password": "secret-password"
/// }
/// ```
///
/// # Errors
/// - 400 Bad Request: malformed body
/// - 401 Unauthorized: unknown identifier or wrong password (same response)
/// - 403 Forbidden: account locked or not verified
pub async fn login<R, P, E>(
    state: web::Data<AppState<R, P, E>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.identifier, &request.password)
        .await
    {
        Ok(login) => {
            let (session_cookie, activity_cookie) = session_cookies(
                &state.config.session,
                &login.session_token,
                login.last_activity,
            );
            let body = LoginSuccessResponse {
                account_id: login.account_id,
                email: login.email,
                name: login.name,
                role: login.role,
                last_activity: login.last_activity,
            };
            HttpResponse::Ok()
                .cookie(session_cookie)
                .cookie(activity_cookie)
                .json(ApiResponse::success(body))
        }
        Err(error) => handle_domain_error(&error),
    }
}
