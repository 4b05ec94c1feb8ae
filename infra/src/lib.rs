//! # EduDesk Infrastructure
//!
//! Concrete implementations of the interfaces defined in `ed_core`:
//! MySQL account persistence, bcrypt password hashing and HTTP email
//! dispatch.

pub mod database;
pub mod email;
pub mod password;

use thiserror::Error;

/// Infrastructure-level errors raised during service construction
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub use database::{create_pool, MySqlAccountRepository};
pub use email::{HttpEmailService, MailerConfig};
pub use password::BcryptPasswordHasher;
