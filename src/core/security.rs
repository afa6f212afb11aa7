use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::core::error::{AppError, Result};

/// One-way password hashing using Argon2.
///
/// Plaintext passwords are hashed exactly once at user creation; this layer
/// never exposes a verify side channel over HTTP.
#[derive(Debug, Clone, Default)]
pub struct PasswordEncoder;

impl PasswordEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
    }

    /// Verify a plaintext password against a stored hash
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
