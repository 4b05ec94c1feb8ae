//! Session and lockout configuration

use serde::{Deserialize, Serialize};

/// Session cookie and idle-timeout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Secret key used to sign session tokens
    pub secret: String,

    /// Idle timeout in seconds; a session with no activity for longer
    /// than this is force-expired (default: 1800 = 30 minutes)
    pub idle_timeout_seconds: i64,

    /// Session cookie name
    pub cookie_name: String,

    /// Last-activity cookie name
    pub activity_cookie_name: String,

    /// Cookie max-age in seconds
    pub cookie_max_age_seconds: i64,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session token issuer claim
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-this-secret-in-production"),
            idle_timeout_seconds: 1800, // 30 minutes
            cookie_name: String::from("edudesk_session"),
            activity_cookie_name: String::from("edudesk_last_activity"),
            cookie_max_age_seconds: 1800,
            secure: false, // set to true in production
            issuer: String::from("edudesk"),
        }
    }
}

impl SessionConfig {
    /// Create a session configuration with an explicit secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if the default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "change-this-secret-in-production"
    }
}

/// Account lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Failed attempts before the account is locked (default: 5)
    pub max_failed_attempts: u32,

    /// Duration in seconds for which an account remains locked
    /// (default: 900 = 15 minutes)
    pub lock_duration_seconds: i64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lock_duration_seconds: 900, // 15 minutes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.idle_timeout_seconds, 1800);
        assert_eq!(config.cookie_name, "edudesk_session");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_session_config_with_secret() {
        let config = SessionConfig::new("real-secret");
        assert!(!config.is_using_default_secret());
        assert_eq!(config.secret, "real-secret");
    }

    #[test]
    fn test_lockout_config_defaults() {
        let config = LockoutConfig::default();
        assert_eq!(config.max_failed_attempts, 5);
        assert_eq!(config.lock_duration_seconds, 900);
    }
}
