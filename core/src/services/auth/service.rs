//! Main authentication service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, error, info, warn};

use ed_shared::utils::validation;

use crate::domain::entities::Account;
use crate::domain::value_objects::LoginResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::session::SessionService;

use super::config::AuthServiceConfig;
use super::email::EmailServiceTrait;
use super::password::PasswordHasherTrait;
use super::tokens::generate_token;

/// Authentication service for the complete login / signup / recovery flow
pub struct AuthService<R, P, E>
where
    R: AccountRepository,
    P: PasswordHasherTrait,
    E: EmailServiceTrait,
{
    /// Account repository for persistence
    repository: Arc<R>,
    /// Password hashing service
    password_hasher: Arc<P>,
    /// Transactional email dispatch
    email_service: Arc<E>,
    /// Session token issuer
    session_service: Arc<SessionService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<R, P, E> AuthService<R, P, E>
where
    R: AccountRepository,
    P: PasswordHasherTrait,
    E: EmailServiceTrait,
{
    /// Create a new authentication service
    pub fn new(
        repository: Arc<R>,
        password_hasher: Arc<P>,
        email_service: Arc<E>,
        session_service: Arc<SessionService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            email_service,
            session_service,
            config,
        }
    }

    /// Authenticate an account and issue a session.
    ///
    /// `identifier` is an email address or a phone number. The failure
    /// order is fixed: lock state first, then verification state, then the
    /// password check — a locked account fails with `AccountLocked` even
    /// when the password is correct.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<LoginResponse> {
        let account = self.verify_credentials(identifier, password).await?;
        let (token, session) = self.session_service.issue(&account)?;
        info!(account_id = %account.id, "login succeeded");
        Ok(LoginResponse::new(token, &session))
    }

    /// Route the identifier to the right lookup: emails are normalized
    /// (trimmed, lowercased) first, phone numbers only trimmed.
    async fn lookup_by_identifier(&self, identifier: &str) -> DomainResult<Option<Account>> {
        if validation::looks_like_email(identifier) {
            self.repository
                .find_by_email(&validation::normalize_email(identifier))
                .await
        } else {
            self.repository.find_by_phone(identifier.trim()).await
        }
    }

    /// Credential verification: lookup, lock check, verified check, hash
    /// check. A password mismatch feeds the lockout counter.
    pub async fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> DomainResult<Account> {
        let account = self.lookup_by_identifier(identifier).await?;

        let Some(mut account) = account else {
            // identical failure to a wrong password, so callers cannot
            // probe which identifiers exist
            debug!("login attempt for unknown identifier");
            return Err(AuthError::InvalidCredentials.into());
        };

        let now = Utc::now();
        if account.is_locked(now) {
            warn!(account_id = %account.id, "login rejected: account locked");
            return Err(AuthError::AccountLocked.into());
        }

        if !account.is_verified {
            return Err(AuthError::AccountNotVerified.into());
        }

        if !self
            .password_hasher
            .verify(password, &account.password_hash)?
        {
            let lock_until = now + Duration::seconds(self.config.lockout.lock_duration_seconds);
            let attempts = self
                .repository
                .record_failed_attempt(account.id, self.config.lockout.max_failed_attempts, lock_until)
                .await?;
            warn!(
                account_id = %account.id,
                attempts,
                max_attempts = self.config.lockout.max_failed_attempts,
                "failed login attempt recorded"
            );
            // the attempt that crossed the threshold still reports a
            // credential failure; the lock applies from the next attempt
            return Err(AuthError::InvalidCredentials.into());
        }

        account.reset_lockout();
        account.update_last_login();
        let account = self.repository.update(account).await?;
        Ok(account)
    }

    /// Register a new account and send the verification email.
    ///
    /// The account is persisted unverified before the email goes out; a
    /// dispatch failure surfaces as `EmailDispatchFailed` while the record
    /// stays in place, so the signup is never silently lost.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> DomainResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }

        let email = validation::normalize_email(email);
        if !validation::is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let phone = phone.trim();
        if !validation::is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhone.into());
        }

        if !validation::is_valid_password(password) {
            return Err(ValidationError::PasswordTooShort {
                min: validation::MIN_PASSWORD_LENGTH,
            }
            .into());
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }
        if self.repository.find_by_phone(phone).await?.is_some() {
            return Err(AuthError::PhoneAlreadyRegistered.into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let verification_token = generate_token();

        let account = Account::new(
            email,
            phone.to_string(),
            name.to_string(),
            password_hash,
            verification_token.clone(),
        );
        let account = self.repository.create(account).await?;
        info!(account_id = %account.id, "account created, pending verification");

        let url = format!(
            "{}?token={}",
            self.config.verification_url_base, verification_token
        );
        if let Err(provider_error) = self
            .email_service
            .send_verification_email(&account.email, &account.name, &url)
            .await
        {
            error!(account_id = %account.id, provider_error, "verification email dispatch failed");
            return Err(AuthError::EmailDispatchFailed.into());
        }

        Ok(account)
    }

    /// Redeem an email-verification token.
    ///
    /// Single-use: the token is cleared on success, so a replay misses the
    /// lookup and gets the generic not-found error.
    pub async fn verify_email(&self, token: &str) -> DomainResult<Account> {
        let account = self
            .repository
            .find_by_verification_token(token)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "verification token".to_string(),
            })?;

        let mut account = account;
        account.verify();
        let account = self.repository.update(account).await?;
        info!(account_id = %account.id, "email verified");
        Ok(account)
    }

    /// Start the password-reset flow.
    ///
    /// Always returns `Ok(())`: the response must be indistinguishable
    /// whether the email is registered, unknown, or an internal call
    /// failed. Failures are logged, never surfaced.
    pub async fn request_password_reset(&self, email: &str) {
        let email = validation::normalize_email(email);

        let account = match self.repository.find_by_email(&email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                debug!("password reset requested for unknown email");
                return;
            }
            Err(e) => {
                error!(error = %e, "password reset lookup failed");
                return;
            }
        };

        let token = generate_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.reset_token_ttl_seconds);

        let mut account = account;
        account.set_reset_token(token.clone(), expires_at);
        let account = match self.repository.update(account).await {
            Ok(account) => account,
            Err(e) => {
                error!(error = %e, "failed to store reset token");
                return;
            }
        };

        let url = format!("{}?token={}", self.config.reset_url_base, token);
        if let Err(provider_error) = self
            .email_service
            .send_reset_email(&account.email, &account.name, &url)
            .await
        {
            error!(account_id = %account.id, provider_error, "reset email dispatch failed");
        }
    }

    /// Redeem a password-reset token and set the new password.
    ///
    /// A successful reset is proof of ownership: it also clears the
    /// failed-attempt counter and any lock.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<Account> {
        if !validation::is_valid_password(new_password) {
            return Err(ValidationError::PasswordTooShort {
                min: validation::MIN_PASSWORD_LENGTH,
            }
            .into());
        }

        let account = self
            .repository
            .find_by_reset_token(token)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "reset token".to_string(),
            })?;

        let now = Utc::now();
        match account.reset_token_expires_at {
            Some(expires_at) if expires_at > now => {}
            _ => {
                warn!(account_id = %account.id, "expired reset token rejected");
                return Err(TokenError::TokenExpired.into());
            }
        }

        let password_hash = self.password_hasher.hash(new_password)?;

        let mut account = account;
        account.set_password_hash(password_hash);
        account.clear_reset_token();
        let account = self.repository.update(account).await?;

        self.repository.reset_lockout(account.id).await?;
        info!(account_id = %account.id, "password reset completed, lockout cleared");

        // return the post-reset state
        self.repository
            .find_by_id(account.id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "Account".to_string(),
            })
    }
}
