//! Runtime configuration assembled from environment variables

use ed_shared::config::{
    auth::{LockoutConfig, SessionConfig},
    database::DatabaseConfig,
    environment::Environment,
    server::ServerConfig,
};
use std::env;

/// Complete API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub lockout: LockoutConfig,
    pub environment: Environment,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Build the configuration from environment variables, falling back
    /// to development defaults for anything unset.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        let database_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(database_defaults.url),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", database_defaults.max_connections),
            min_connections: env_or("DATABASE_MIN_CONNECTIONS", database_defaults.min_connections),
            connect_timeout_seconds: env_or(
                "DATABASE_CONNECT_TIMEOUT_SECONDS",
                database_defaults.connect_timeout_seconds,
            ),
        };

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or(server_defaults.host),
            port: env_or("SERVER_PORT", server_defaults.port),
            workers: env_or("SERVER_WORKERS", server_defaults.workers),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(server_defaults.cors_origins),
        };

        let mut session = match env::var("SESSION_SECRET") {
            Ok(secret) => SessionConfig::new(secret),
            Err(_) => SessionConfig::default(),
        };
        session.secure = environment.is_production();

        let lockout_defaults = LockoutConfig::default();
        let lockout = LockoutConfig {
            max_failed_attempts: env_or(
                "LOCKOUT_MAX_FAILED_ATTEMPTS",
                lockout_defaults.max_failed_attempts,
            ),
            lock_duration_seconds: env_or(
                "LOCKOUT_DURATION_SECONDS",
                lockout_defaults.lock_duration_seconds,
            ),
        };

        Config {
            database,
            server,
            session,
            lockout,
            environment,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_env();
        assert_eq!(config.lockout.max_failed_attempts, 5);
        assert_eq!(config.session.idle_timeout_seconds, 1800);
    }
}
