//! Application factory
//!
//! Builds the Actix application from an [`AppState`], wiring the routes,
//! the session middleware and CORS.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Compat, Logger},
    web, App, Error, HttpResponse,
};
use std::sync::Arc;

use crate::middleware::cors::create_cors;
use crate::middleware::session::SessionAuth;
use crate::routes::auth::{
    forgot_password::forgot_password, login::login, logout::logout, refresh::refresh,
    reset_password::reset_password, session::current_session, signup::signup,
    verify_email::verify_email, AppState,
};

use ed_core::repositories::AccountRepository;
use ed_core::services::auth::{EmailServiceTrait, PasswordHasherTrait};

/// Create and configure the application with all dependencies
pub fn create_app<R, P, E>(
    app_state: web::Data<AppState<R, P, E>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    R: AccountRepository + 'static,
    P: PasswordHasherTrait + 'static,
    E: EmailServiceTrait + 'static,
{
    let cors = create_cors(&app_state.config.server, app_state.config.is_production());
    let session_guard = SessionAuth::new(
        Arc::clone(&app_state.session_service),
        app_state.config.session.clone(),
    );

    App::new()
        .app_data(app_state)
        // Compat keeps the response body boxed, so the factory type stays
        // nameable for the integration tests
        .wrap(Compat::new(Logger::default()))
        .wrap(Compat::new(cors))
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<R, P, E>))
                    .route("/logout", web::post().to(logout::<R, P, E>))
                    .route("/refresh", web::post().to(refresh::<R, P, E>))
                    .route("/signup", web::post().to(signup::<R, P, E>))
                    .route("/verify-email", web::post().to(verify_email::<R, P, E>))
                    .route(
                        "/forgot-password",
                        web::post().to(forgot_password::<R, P, E>),
                    )
                    .route(
                        "/reset-password",
                        web::post().to(reset_password::<R, P, E>),
                    )
                    .service(
                        web::scope("/session")
                            .wrap(session_guard)
                            .route("", web::get().to(current_session)),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "edudesk-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
