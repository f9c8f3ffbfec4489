use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Upper bound on accepted plaintext length.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Salted one-way password hashing (Argon2id, PHC string output).
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls with the same input produce different digests; both verify.
    ///
    /// # Errors
    /// * `Empty` - Plaintext is empty
    /// * `TooLong` - Plaintext exceeds `MAX_PASSWORD_BYTES`
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Self::check_length(password)?;

        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC digest.
    ///
    /// The digest comparison is constant-time. Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    /// * `VerificationFailed` - Digest is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn check_length(password: &str) -> Result<(), PasswordError> {
        match password.len() {
            0 => Err(PasswordError::Empty),
            n if n > MAX_PASSWORD_BYTES => Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: n,
            }),
            _ => Ok(()),
        }
    }
}
