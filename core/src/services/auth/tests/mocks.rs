//! Mock implementations for testing the authentication service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::DomainError;
use crate::services::auth::email::EmailServiceTrait;
use crate::services::auth::password::PasswordHasherTrait;

/// Transparent password hasher: `hash(p) = "hashed:" + p`
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    pub fn hash_of(plain: &str) -> String {
        format!("hashed:{plain}")
    }
}

impl PasswordHasherTrait for MockPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        Ok(Self::hash_of(plain))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(Self::hash_of(plain) == hash)
    }
}

/// Recorded outgoing email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub url: String,
    pub kind: EmailKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    Verification,
    Reset,
}

/// Email service recording sent messages, optionally failing every send
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub fail: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> Option<SentEmail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        _name: &str,
        verification_url: &str,
    ) -> Result<String, String> {
        if self.fail {
            return Err("provider unavailable".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            url: verification_url.to_string(),
            kind: EmailKind::Verification,
        });
        Ok("mock-message-id".to_string())
    }

    async fn send_reset_email(
        &self,
        to: &str,
        _name: &str,
        reset_url: &str,
    ) -> Result<String, String> {
        if self.fail {
            return Err("provider unavailable".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            url: reset_url.to_string(),
            kind: EmailKind::Reset,
        });
        Ok("mock-message-id".to_string())
    }
}
