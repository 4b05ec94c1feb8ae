//! HTTP email provider client
//!
//! Sends templated transactional mail through a JSON HTTP API
//! (SendGrid-style `POST /send` with a bearer key). Implements the
//! `EmailServiceTrait` seam from the core crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use ed_core::services::auth::EmailServiceTrait;

use crate::InfrastructureError;

/// Email provider configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Provider endpoint URL
    pub endpoint: String,
    /// Provider API key
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Sender display name
    pub from_name: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl MailerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let endpoint = std::env::var("MAILER_ENDPOINT")
            .map_err(|_| InfrastructureError::Config("MAILER_ENDPOINT not set".to_string()))?;
        let api_key = std::env::var("MAILER_API_KEY")
            .map_err(|_| InfrastructureError::Config("MAILER_API_KEY not set".to_string()))?;
        let from_address = std::env::var("MAILER_FROM_ADDRESS")
            .map_err(|_| InfrastructureError::Config("MAILER_FROM_ADDRESS not set".to_string()))?;

        Ok(Self {
            endpoint,
            api_key,
            from_address,
            from_name: std::env::var("MAILER_FROM_NAME")
                .unwrap_or_else(|_| "EduDesk".to_string()),
            request_timeout_secs: std::env::var("MAILER_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from_address: &'a str,
    from_name: &'a str,
    to: &'a str,
    subject: &'a str,
    template: &'a str,
    #[serde(rename = "variables")]
    vars: SendVars<'a>,
}

#[derive(Debug, Serialize)]
struct SendVars<'a> {
    name: &'a str,
    action_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    message_id: String,
}

/// Email service backed by an HTTP mail provider
pub struct HttpEmailService {
    client: reqwest::Client,
    config: MailerConfig,
}

impl HttpEmailService {
    /// Create a new email service
    pub fn new(config: MailerConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Config(format!("HTTP client build failed: {e}")))?;

        info!(from = %config.from_address, "email service initialized");
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MailerConfig::from_env()?)
    }

    async fn send(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        name: &str,
        action_url: &str,
    ) -> Result<String, String> {
        let body = SendRequest {
            from_address: &self.config.from_address,
            from_name: &self.config.from_name,
            to,
            subject,
            template,
            vars: SendVars { name, action_url },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(template, error = %e, "email provider request failed");
                format!("request failed: {e}")
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(template, %status, "email provider returned error status");
            return Err(format!("provider returned {status}"));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid provider response: {e}"))?;

        debug!(template, message_id = %parsed.message_id, "email dispatched");
        Ok(parsed.message_id)
    }
}

#[async_trait]
impl EmailServiceTrait for HttpEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        name: &str,
        verification_url: &str,
    ) -> Result<String, String> {
        self.send(
            to,
            "Verify your EduDesk account",
            "account-verification",
            name,
            verification_url,
        )
        .await
    }

    async fn send_reset_email(
        &self,
        to: &str,
        name: &str,
        reset_url: &str,
    ) -> Result<String, String> {
        self.send(
            to,
            "Reset your EduDesk password",
            "password-reset",
            name,
            reset_url,
        )
        .await
    }
}
