//! Account entity representing a registered user of an academy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to an account at signup.
///
/// Signup currently assigns `Staff` unconditionally; the variant set leaves
/// room for the admin console to promote accounts later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Academy owner with full administrative access
    Admin,
    /// Academy staff member
    Staff,
}

/// Account entity: the persisted user record, including credential,
/// verification and lockout state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Email address, unique, stored lowercased and trimmed
    pub email: String,

    /// Phone number, unique
    pub phone: String,

    /// Display name
    pub name: String,

    /// Password hash (never the plaintext)
    pub password_hash: String,

    /// Role assigned at signup
    pub role: AccountRole,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Single-use email verification token, cleared on success
    pub verification_token: Option<String>,

    /// Consecutive failed login attempts since the last success
    pub failed_attempts: u32,

    /// If set and in the future, login is blocked regardless of the password
    pub locked_until: Option<DateTime<Utc>>,

    /// Single-use password reset token
    pub reset_token: Option<String>,

    /// Expiry instant of the reset token
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    /// Whether the signup flow has been fully completed
    pub registration_complete: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new unverified account with a pending verification token
    pub fn new(
        email: String,
        phone: String,
        name: String,
        password_hash: String,
        verification_token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            phone,
            name,
            password_hash,
            role: AccountRole::Staff,
            is_verified: false,
            verification_token: Some(verification_token),
            failed_attempts: 0,
            locked_until: None,
            reset_token: None,
            reset_token_expires_at: None,
            registration_complete: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether the account is locked at the given instant
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if until > now)
    }

    /// Record one failed password attempt, locking the account until
    /// `lock_until` once the threshold is reached. Returns the new
    /// attempt count.
    ///
    /// The attempt that crosses the threshold sets `locked_until` but is
    /// itself still reported as a credential failure by the caller; only
    /// subsequent attempts observe the lock. A stale `locked_until` in
    /// the past does not count as a lock: the next failure at or beyond
    /// the threshold re-engages it.
    pub fn record_failed_attempt(
        &mut self,
        max_attempts: u32,
        lock_until: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> u32 {
        self.failed_attempts += 1;
        if self.failed_attempts >= max_attempts && !self.is_locked(now) {
            self.locked_until = Some(lock_until);
        }
        self.updated_at = now;
        self.failed_attempts
    }

    /// Clear the failed-attempt counter and any lock.
    /// Invoked after a successful login or password reset.
    pub fn reset_lockout(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
        self.updated_at = Utc::now();
    }

    /// Mark the email address as verified, consuming the verification token
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.verification_token = None;
        self.registration_complete = true;
        self.updated_at = Utc::now();
    }

    /// Attach a password reset token with its expiry
    pub fn set_reset_token(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.reset_token = Some(token);
        self.reset_token_expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Consume the reset token so it cannot be replayed
    pub fn clear_reset_token(&mut self) {
        self.reset_token = None;
        self.reset_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Replace the password hash
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }

    /// Update the last successful login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_account() -> Account {
        Account::new(
            "a@x.com".to_string(),
            "+61412345678".to_string(),
            "Alice".to_string(),
            "hashed".to_string(),
            "verify-token".to_string(),
        )
    }

    #[test]
    fn test_new_account_is_unverified() {
        let account = sample_account();
        assert!(!account.is_verified);
        assert!(!account.registration_complete);
        assert_eq!(account.failed_attempts, 0);
        assert!(account.locked_until.is_none());
        assert_eq!(account.verification_token.as_deref(), Some("verify-token"));
        assert_eq!(account.role, AccountRole::Staff);
    }

    #[test]
    fn test_failed_attempts_lock_at_threshold() {
        let mut account = sample_account();
        let now = Utc::now();
        let lock_until = now + Duration::minutes(15);
        for expected in 1..5 {
            let count = account.record_failed_attempt(5, lock_until, now);
            assert_eq!(count, expected);
            if expected < 5 {
                assert!(!account.is_locked(now));
            }
        }
        // the 5th attempt crosses the threshold
        let count = account.record_failed_attempt(5, lock_until, now);
        assert_eq!(count, 5);
        assert!(account.is_locked(now));
        assert_eq!(account.locked_until, Some(lock_until));
    }

    #[test]
    fn test_lock_expires_with_time() {
        let mut account = sample_account();
        let now = Utc::now();
        for _ in 0..5 {
            account.record_failed_attempt(5, now + Duration::minutes(15), now);
        }
        assert!(account.is_locked(now));
        assert!(account.is_locked(now + Duration::minutes(14)));
        assert!(!account.is_locked(now + Duration::minutes(16)));
    }

    #[test]
    fn test_expired_lock_reengages_on_next_failure() {
        let mut account = sample_account();
        account.failed_attempts = 5;
        account.locked_until = Some(Utc::now() - Duration::minutes(1));

        let now = Utc::now();
        let count = account.record_failed_attempt(5, now + Duration::minutes(15), now);
        assert_eq!(count, 6);
        // the stale past lock must not suppress a fresh one
        assert!(account.is_locked(now));
        assert_eq!(account.locked_until, Some(now + Duration::minutes(15)));
    }

    #[test]
    fn test_reset_lockout_clears_counter_and_lock() {
        let mut account = sample_account();
        let now = Utc::now();
        for _ in 0..5 {
            account.record_failed_attempt(5, now + Duration::minutes(15), now);
        }
        account.reset_lockout();
        assert_eq!(account.failed_attempts, 0);
        assert!(account.locked_until.is_none());
        assert!(!account.is_locked(now));
    }

    #[test]
    fn test_verify_consumes_token() {
        let mut account = sample_account();
        account.verify();
        assert!(account.is_verified);
        assert!(account.registration_complete);
        assert!(account.verification_token.is_none());
    }

    #[test]
    fn test_reset_token_lifecycle() {
        let mut account = sample_account();
        let expires = Utc::now() + Duration::hours(1);
        account.set_reset_token("reset-token".to_string(), expires);
        assert_eq!(account.reset_token.as_deref(), Some("reset-token"));
        assert_eq!(account.reset_token_expires_at, Some(expires));

        account.clear_reset_token();
        assert!(account.reset_token.is_none());
        assert!(account.reset_token_expires_at.is_none());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&AccountRole::Staff).unwrap();
        assert_eq!(json, "\"staff\"");
        let json = serde_json::to_string(&AccountRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
