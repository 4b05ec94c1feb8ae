//! Bcrypt implementation of the password hashing trait

use ed_core::errors::DomainError;
use ed_core::services::auth::PasswordHasherTrait;

/// Password hasher backed by bcrypt
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasherTrait for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        bcrypt::hash(plain, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {e}"),
        })
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(plain, hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        // minimum cost keeps the test fast
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("password123").unwrap();

        assert_ne!(hash, "password123");
        assert!(hasher.verify("password123", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(hasher.verify("password123", "not-a-bcrypt-hash").is_err());
    }
}
