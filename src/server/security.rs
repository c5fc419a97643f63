//! Password storage.
//!
//! Every route is public, login is the only place credentials are checked.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use log::warn;

/// Hashes and verifies passwords with argon2 and a random salt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordEncoder;

impl PasswordEncoder {
    pub fn encode(&self, raw: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default().hash_password(raw.as_bytes(), &salt)?.to_string())
    }

    /// false for a mismatch and for an unreadable stored hash
    pub fn matches(&self, raw: &str, encoded: &str) -> bool {
        let parsed = match PasswordHash::new(encoded) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("stored password hash is unreadable, {}", e);
                return false;
            }
        };
        Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok()
    }
}
