//! Runtime environment detection

use serde::{Deserialize, Serialize};

/// Runtime environment the server is deployed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Resolve from the `EDUDESK_ENV` environment variable,
    /// defaulting to development
    pub fn from_env() -> Self {
        match std::env::var("EDUDESK_ENV").as_deref() {
            Ok("production") => Self::Production,
            Ok("staging") => Self::Staging,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::Development
    }
}
