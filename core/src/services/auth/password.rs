//! Password hashing trait
//!
//! The hashing scheme is an infrastructure concern; the domain only needs
//! `hash` and `verify`. The bcrypt implementation lives in the infra
//! crate, tests use a transparent fake.

use crate::errors::DomainError;

/// Trait for password hashing and verification
pub trait PasswordHasherTrait: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError>;
}
