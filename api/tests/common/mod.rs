//! Shared fixtures for the API integration tests

use actix_web::web;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use ed_api::config::Config;
use ed_api::routes::auth::AppState;

use ed_core::domain::entities::Account;
use ed_core::errors::DomainError;
use ed_core::repositories::{AccountRepository, MockAccountRepository};
use ed_core::services::auth::{
    AuthService, AuthServiceConfig, EmailServiceTrait, PasswordHasherTrait,
};
use ed_core::services::SessionService;
use ed_shared::config::auth::SessionConfig;
use ed_shared::config::environment::Environment;

pub const PASSWORD: &str = "password123";
pub const SESSION_COOKIE: &str = "edudesk_session";
pub const ACTIVITY_COOKIE: &str = "edudesk_last_activity";

/// Transparent "hash" so tests can mint stored hashes without bcrypt
pub struct TestPasswordHasher;

impl PasswordHasherTrait for TestPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{plain}"))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{plain}"))
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub url: String,
}

/// Email service that records what it was asked to send
pub struct TestEmailService {
    sent: Mutex<Vec<SentEmail>>,
}

impl TestEmailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> Option<SentEmail> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Token carried by the most recently sent action URL
    pub fn last_token(&self) -> Option<String> {
        self.last_sent()
            .and_then(|email| email.url.split("token=").nth(1).map(|t| t.to_string()))
    }

    fn record(&self, to: &str, url: &str) {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            url: url.to_string(),
        });
    }
}

#[async_trait]
impl EmailServiceTrait for TestEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        _name: &str,
        verification_url: &str,
    ) -> Result<String, String> {
        self.record(to, verification_url);
        Ok("test-message-id".to_string())
    }

    async fn send_reset_email(
        &self,
        to: &str,
        _name: &str,
        reset_url: &str,
    ) -> Result<String, String> {
        self.record(to, reset_url);
        Ok("test-message-id".to_string())
    }
}

pub type TestState = AppState<MockAccountRepository, TestPasswordHasher, TestEmailService>;

pub fn test_config() -> Config {
    Config {
        database: Default::default(),
        server: Default::default(),
        session: SessionConfig::new("test-secret"),
        lockout: Default::default(),
        environment: Environment::Development,
    }
}

pub struct TestContext {
    pub repo: Arc<MockAccountRepository>,
    pub email: Arc<TestEmailService>,
    pub state: web::Data<TestState>,
}

/// Build an application state over the in-memory repository, seeded with
/// the given accounts
pub async fn test_context_with(accounts: Vec<Account>) -> TestContext {
    let repo = Arc::new(MockAccountRepository::new());
    for account in accounts {
        repo.create(account).await.expect("seed account");
    }

    let email = Arc::new(TestEmailService::new());
    let config = test_config();
    let session_service = Arc::new(SessionService::new(config.session.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repo),
        Arc::new(TestPasswordHasher),
        Arc::clone(&email),
        Arc::clone(&session_service),
        AuthServiceConfig {
            lockout: config.lockout.clone(),
            ..AuthServiceConfig::default()
        },
    ));

    let state = web::Data::new(AppState {
        auth_service,
        session_service,
        config,
    });

    TestContext { repo, email, state }
}

pub async fn test_context() -> TestContext {
    test_context_with(Vec::new()).await
}

/// A verified account that can log in with [`PASSWORD`]
pub fn verified_account() -> Account {
    let mut account = Account::new(
        "alice@academy.example".to_string(),
        "+61412345678".to_string(),
        "Alice".to_string(),
        format!("hashed:{PASSWORD}"),
        "seed-verification-token-0123456789ab".to_string(),
    );
    account.verify();
    account
}
