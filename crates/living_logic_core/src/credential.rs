//! Password hashing for registry records.
//!
//! New accounts store an Argon2id PHC string in the `password` field. Slots
//! written before hashing was introduced still hold plaintext, so
//! verification falls back to exact comparison for values that do not parse
//! as a PHC string.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PHC_PREFIX: &str = "$argon2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialError(String);

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "password hashing failed: {}", self.0)
    }
}

impl Error for CredentialError {}

/// Hashes `password` with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialError(err.to_string()))
}

/// Checks `password` against a stored value.
///
/// Stored values that look like an Argon2 PHC string are verified as hashes;
/// anything else is treated as legacy plaintext and compared exactly.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if !is_hashed(stored) {
        return password == stored;
    }
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Returns whether `stored` is an Argon2 PHC string.
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(PHC_PREFIX)
}
