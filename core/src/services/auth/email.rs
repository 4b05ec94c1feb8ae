//! Email dispatch trait
//!
//! Templated transactional mail (verification link, reset link) goes
//! through this seam. Implementations live in the infra crate; errors are
//! provider messages, opaque to the domain.

use async_trait::async_trait;

/// Trait for dispatching transactional email
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send the email-verification message.
    ///
    /// # Returns
    /// * `Ok(message_id)` - provider message id
    /// * `Err(message)` - provider failure description
    async fn send_verification_email(
        &self,
        to: &str,
        name: &str,
        verification_url: &str,
    ) -> Result<String, String>;

    /// Send the password-reset message.
    async fn send_reset_email(
        &self,
        to: &str,
        name: &str,
        reset_url: &str,
    ) -> Result<String, String>;
}
