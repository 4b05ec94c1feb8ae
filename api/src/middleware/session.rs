//! Session cookie middleware.
//!
//! Guards a scope with the session-activity state machine: requests with a
//! valid session cookie inside the idle window pass through with the
//! session injected into request extensions and both cookies re-issued
//! with a refreshed last-activity; anything else is rejected with 401 and
//! both cookies deleted.

use actix_web::{
    body::EitherBody,
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ed_core::domain::entities::{Session, SessionActivity};
use ed_core::services::SessionService;
use ed_shared::config::SessionConfig;
use ed_shared::types::response::ErrorResponse;

/// Build the session cookie and the last-activity cookie for an issued or
/// refreshed token
pub fn session_cookies(
    config: &SessionConfig,
    token: &str,
    last_activity: DateTime<Utc>,
) -> (Cookie<'static>, Cookie<'static>) {
    let session_cookie = Cookie::build(config.cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(config.cookie_max_age_seconds))
        .finish();

    let activity_cookie = Cookie::build(
        config.activity_cookie_name.clone(),
        last_activity.timestamp().to_string(),
    )
    .path("/")
    .http_only(true)
    .secure(config.secure)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(config.cookie_max_age_seconds))
    .finish();

    (session_cookie, activity_cookie)
}

/// Build deletion cookies for both session cookies (empty value, zero
/// max-age)
pub fn cleared_session_cookies(config: &SessionConfig) -> (Cookie<'static>, Cookie<'static>) {
    let session_cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish();

    let activity_cookie = Cookie::build(config.activity_cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish();

    (session_cookie, activity_cookie)
}

/// Session extracted by [`SessionAuth`] and injected into the request
#[derive(Debug, Clone)]
pub struct SessionContext(pub Session);

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Session>()
                .cloned()
                .map(SessionContext)
                .ok_or_else(|| ErrorUnauthorized("No active session")),
        )
    }
}

/// Session authentication middleware factory
pub struct SessionAuth {
    sessions: Arc<SessionService>,
    config: SessionConfig,
}

impl SessionAuth {
    pub fn new(sessions: Arc<SessionService>, config: SessionConfig) -> Self {
        Self { sessions, config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            sessions: Arc::clone(&self.sessions),
            config: self.config.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    sessions: Arc<SessionService>,
    config: SessionConfig,
}

fn finish<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    ServiceResponse::new(request, response).map_into_right_body()
}

fn reject<B>(
    req: ServiceRequest,
    config: &SessionConfig,
    code: &str,
    message: &str,
) -> ServiceResponse<EitherBody<B>> {
    let mut response = HttpResponse::Unauthorized().json(ErrorResponse::new(code, message));
    let (session_cookie, activity_cookie) = cleared_session_cookies(config);
    let _ = response.add_cookie(&session_cookie);
    let _ = response.add_cookie(&activity_cookie);
    finish(req, response)
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let sessions = Arc::clone(&self.sessions);
        let config = self.config.clone();

        Box::pin(async move {
            let Some(cookie) = req.cookie(&config.cookie_name) else {
                return Ok(reject(req, &config, "no_session", "No active session"));
            };

            let session = match sessions.verify(cookie.value()) {
                Ok(session) => session,
                Err(_) => {
                    // malformed, tampered or expired: all look the same
                    return Ok(reject(
                        req,
                        &config,
                        "no_session",
                        "No active session",
                    ));
                }
            };

            let refreshed = match sessions.check_activity(session, Utc::now()) {
                SessionActivity::Active(session) => session,
                SessionActivity::Expired => {
                    return Ok(reject(
                        req,
                        &config,
                        "session_expired",
                        "Your session has expired. Please log in again",
                    ));
                }
            };

            let token = match sessions.sign(&refreshed) {
                Ok(token) => token,
                Err(e) => {
                    log::error!("session re-sign failed: {e}");
                    let response = HttpResponse::InternalServerError().json(ErrorResponse::new(
                        "unexpected_error",
                        "An unexpected error occurred",
                    ));
                    return Ok(finish(req, response));
                }
            };

            req.extensions_mut().insert(refreshed.clone());

            let mut res = service.call(req).await?;

            // sliding window: every authenticated request pushes the idle
            // deadline out
            let (session_cookie, activity_cookie) =
                session_cookies(&config, &token, refreshed.last_activity);
            let _ = res.response_mut().add_cookie(&session_cookie);
            let _ = res.response_mut().add_cookie(&activity_cookie);

            Ok(res.map_into_left_body())
        })
    }
}
