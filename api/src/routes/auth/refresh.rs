use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;

use crate::dto::auth::SessionResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::session::{cleared_session_cookies, session_cookies};

use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};
use ed_shared::types::response::{ApiResponse, ErrorResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Explicit activity check for the session carried in the cookie:
/// - within the idle window the token is re-signed with a refreshed
///   last-activity and both cookies are re-issued;
/// - beyond the idle window the session is force-expired and both
///   cookies deleted (401 `session_expired`);
/// - a missing, malformed or tampered cookie is treated as no session
///   (401 `no_session`, cookies deleted).
pub async fn refresh<R, P, E>(
    req: HttpRequest,
    state: web::Data<AppState<R, P, E>>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    P: PasswordHasherTrait + 'static,
    E: EmailServiceTrait + 'static,
{
    let config = &state.config.session;

    let Some(cookie) = req.cookie(&config.cookie_name) else {
        return no_session_response(state.get_ref());
    };

    let session = match state.session_service.verify(cookie.value()) {
        Ok(session) => session,
        Err(_) => return no_session_response(state.get_ref()),
    };

    match state.session_service.refresh(session, Utc::now()) {
        Ok(Some((token, refreshed))) => {
            let (session_cookie, activity_cookie) =
                session_cookies(config, &token, refreshed.last_activity);
            HttpResponse::Ok()
                .cookie(session_cookie)
                .cookie(activity_cookie)
                .json(ApiResponse::success(SessionResponse::from(&refreshed)))
        }
        Ok(None) => {
            let (session_cookie, activity_cookie) = cleared_session_cookies(config);
            HttpResponse::Unauthorized()
                .cookie(session_cookie)
                .cookie(activity_cookie)
                .json(ErrorResponse::new(
                    "session_expired",
                    "Your session has expired. Please log in again",
                ))
        }
        Err(error) => handle_domain_error(&error),
    }
}

fn no_session_response<R, P, E>(state: &AppState<R, P, E>) -> HttpResponse
where
    R: AccountRepository,
    P: PasswordHasherTrait,
    E: EmailServiceTrait,
{
    let (session_cookie, activity_cookie) = cleared_session_cookies(&state.config.session);
    HttpResponse::Unauthorized()
        .cookie(session_cookie)
        .cookie(activity_cookie)
        .json(ErrorResponse::new("no_session", "No active session"))
}
