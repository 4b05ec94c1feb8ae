//! In-memory implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// Mock account repository backed by a HashMap
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository seeded with an existing account
    pub async fn with_existing_account(account: Account) -> Self {
        let repo = Self::new();
        repo.accounts.write().await.insert(account.id, account);
        repo
    }

    /// Snapshot an account for assertions
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }
        if accounts.values().any(|a| a.phone == account.phone) {
            return Err(DomainError::Auth(AuthError::PhoneAlreadyRegistered));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn record_failed_attempt(
        &self,
        id: Uuid,
        lock_threshold: u32,
        lock_until: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        let mut accounts = self.accounts.write().await;

        let account = accounts.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "Account".to_string(),
        })?;

        // single write-lock section, same guarantee as the one-statement
        // UPDATE in the SQL implementation; the transition itself is the
        // entity's, so both implementations share one definition
        Ok(account.record_failed_attempt(lock_threshold, lock_until, Utc::now()))
    }

    async fn reset_lockout(&self, id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;

        let account = accounts.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "Account".to_string(),
        })?;

        account.failed_attempts = 0;
        account.locked_until = None;
        account.updated_at = Utc::now();
        Ok(())
    }
}
