//! CORS configuration for the browser front-end.
//!
//! The session travels in cookies, so cross-origin requests must be
//! credentialed and the allowed origins explicit in production.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ed_shared::config::server::ServerConfig;

/// Create the CORS middleware for the current environment.
///
/// Development allows any origin for easy local testing; production
/// restricts to the configured origins. Credentials support is always on
/// because the session cookie must be sent cross-origin.
pub fn create_cors(server: &ServerConfig, production: bool) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(3600);

    if production {
        log::info!(
            "CORS restricted to {} configured origin(s)",
            server.cors_origins.len()
        );
        server
            .cors_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    } else {
        log::info!("CORS configured permissively for development");
        // allow_any_origin is incompatible with credentials, so echo the
        // caller's origin instead
        cors.allowed_origin_fn(|_origin, _req_head| true)
    }
}
