//! Argon2 hashing of account passwords
//!
//! Stored hashes are PHC strings (`$argon2id$v=19$...`), so the salt and
//! cost parameters travel with each hash.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Hashes sign-up passwords and checks sign-in attempts against stored hashes
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a new password; a failure here is a server fault, surfaced as 500
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// `false` for a wrong password and for a stored hash that does not parse
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id with the crate's default cost parameters
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a PHC string");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
