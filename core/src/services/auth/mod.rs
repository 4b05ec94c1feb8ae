//! Authentication service module
//!
//! This module provides the account session & lockout manager:
//! - Credential verification with lock-state checking
//! - Persisted failed-attempt counting and timed account lockout
//! - Signup with email verification
//! - Single-use password-reset and verification tokens

mod config;
mod email;
mod password;
mod service;
mod tokens;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use email::EmailServiceTrait;
pub use password::PasswordHasherTrait;
pub use service::AuthService;
pub use tokens::{generate_token, TOKEN_LENGTH};
