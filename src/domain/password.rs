//! Password value object.
//!
//! Plain text never leaves this module; callers store and compare the
//! Argon2id PHC string only.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Well-formed hash that no password matches. Verifying against it keeps
/// login timing the same whether or not the account exists.
const UNMATCHABLE_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$Gf3S2TvYU0C3TkwVrCQ8nOqkZ0xS6Wb8bq7v4W9N2Yc";

#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash a new password after checking its length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a stored hash; a missing hash becomes one nothing verifies against.
    pub fn from_stored(hash: Option<&str>) -> Self {
        Self {
            hash: hash.unwrap_or(UNMATCHABLE_HASH).to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Constant-work verification; malformed hashes never match.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = Password::new("correct horse").unwrap();

        assert!(password.verify("correct horse"));
        assert!(!password.verify("wrong horse"));
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_stored_hash_round_trip() {
        let hash = Password::new("agent-password").unwrap().into_string();
        assert!(Password::from_stored(Some(&hash)).verify("agent-password"));
    }

    #[test]
    fn test_salted() {
        let a = Password::new("same-password").unwrap();
        let b = Password::new("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_hash_never_verifies() {
        let absent = Password::from_stored(None);
        assert!(!absent.verify(""));
        assert!(!absent.verify("anything at all"));
    }

    #[test]
    fn test_length_rule() {
        assert!(Password::new("1234567").is_err());
        assert!(Password::new("12345678").is_ok());
    }
}
