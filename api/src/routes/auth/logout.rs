use actix_web::{web, HttpResponse};

use crate::middleware::session::cleared_session_cookies;

use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};
use ed_shared::types::response::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Sessions are stateless, so logout is purely cookie deletion: both the
/// session cookie and the last-activity cookie are expired. Works whether
/// or not a valid session cookie was sent.
pub async fn logout<R, P, E>(state: web::Data<AppState<R, P, E>>) -> HttpResponse
where
    R: AccountRepository + 'static,
    P: PasswordHasherTrait + 'static,
    E: EmailServiceTrait + 'static,
{
    let (session_cookie, activity_cookie) = cleared_session_cookies(&state.config.session);
    HttpResponse::Ok()
        .cookie(session_cookie)
        .cookie(activity_cookie)
        .json(ApiResponse::<()>::message("Logged out successfully"))
}
