//! Account repository trait defining the interface for account persistence.
//!
//! The backing store is the only consistency boundary in this subsystem:
//! request handlers share no in-process mutable state, so every counter and
//! token read/write goes through this interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for [`Account`] persistence operations.
///
/// Implementations handle the actual database operations while keeping the
/// abstraction boundary between the domain and infrastructure layers.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email. The caller normalizes (trims, lowercases)
    /// before lookup.
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - account found
    /// * `Ok(None)` - no account with this email
    /// * `Err(DomainError)` - database error
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find the account holding this email-verification token.
    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, DomainError>;

    /// Find the account holding this password-reset token.
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account.
    ///
    /// # Returns
    /// * `Ok(Account)` - the created account
    /// * `Err(DomainError)` - creation failed (e.g. duplicate email/phone)
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist updated account fields. Cleared token fields must be written
    /// through as NULL so single-use tokens cannot be replayed.
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Atomically increment the failed-attempt counter and, when the new
    /// count reaches `lock_threshold`, set `locked_until` to `lock_until`
    /// in the same statement.
    ///
    /// Atomicity here is what keeps two racing failed attempts from
    /// under-counting toward the lockout.
    ///
    /// # Returns
    /// * `Ok(count)` - the post-increment attempt count
    async fn record_failed_attempt(
        &self,
        id: Uuid,
        lock_threshold: u32,
        lock_until: DateTime<Utc>,
    ) -> Result<u32, DomainError>;

    /// Reset the failed-attempt counter to zero and clear any lock.
    /// Invoked after a successful login or password reset.
    async fn reset_lockout(&self, id: Uuid) -> Result<(), DomainError>;
}
