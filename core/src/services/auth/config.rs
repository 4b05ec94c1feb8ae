//! Configuration for the authentication service

use ed_shared::config::LockoutConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lockout threshold and duration
    pub lockout: LockoutConfig,
    /// Validity window of a password-reset token in seconds
    /// (default: 3600 = 1 hour)
    pub reset_token_ttl_seconds: i64,
    /// Base URL of the email-verification landing page; the token is
    /// appended as a query parameter
    pub verification_url_base: String,
    /// Base URL of the password-reset landing page
    pub reset_url_base: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            lockout: LockoutConfig::default(),
            reset_token_ttl_seconds: 3600, // 1 hour
            verification_url_base: String::from("https://app.edudesk.io/verify-email"),
            reset_url_base: String::from("https://app.edudesk.io/reset-password"),
        }
    }
}
