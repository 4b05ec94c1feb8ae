//! Configuration types shared across server layers

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

pub use auth::{LockoutConfig, SessionConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
