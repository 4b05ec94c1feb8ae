use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;

use ed_api::app::create_app;
use ed_api::config::Config;
use ed_api::routes::auth::AppState;

use ed_core::services::auth::{AuthService, AuthServiceConfig};
use ed_core::services::SessionService;
use ed_infra::{create_pool, BcryptPasswordHasher, HttpEmailService, MySqlAccountRepository};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting EduDesk API server");

    let config = Config::from_env();

    if config.session.is_using_default_secret() {
        if config.is_production() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "SESSION_SECRET must be set in production",
            ));
        }
        warn!("SESSION_SECRET not set, using the development default");
    }

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    info!("Database pool ready");

    let repository = Arc::new(MySqlAccountRepository::new(pool));
    let password_hasher = Arc::new(BcryptPasswordHasher::default());
    let email_service = Arc::new(
        HttpEmailService::from_env()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );
    let session_service = Arc::new(SessionService::new(config.session.clone()));

    let auth_service = Arc::new(AuthService::new(
        repository,
        password_hasher,
        email_service,
        Arc::clone(&session_service),
        AuthServiceConfig {
            lockout: config.lockout.clone(),
            ..AuthServiceConfig::default()
        },
    ));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Server binding to {bind_address}");

    let app_state = web::Data::new(AppState {
        auth_service,
        session_service,
        config,
    });

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
