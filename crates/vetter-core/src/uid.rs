//! Paper-identifier obfuscation.
//!
//! Tokens stand in for real paper numbers in outbound mail. Derivation is a
//! salted PBKDF2 hash over reviewer + shared secret + paper id; the salt is
//! drawn fresh per call, so identical input yields a different token every
//! time and the audit mapping is the only way back from token to paper.

use pbkdf2::Pbkdf2;
use pbkdf2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use thiserror::Error;

/// Characters of the encoded hash kept as the displayed token.
pub const UID_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum UidError {
    #[error("password hash failed: {0}")]
    Hash(pbkdf2::password_hash::Error),
}

/// Derives display tokens for (reviewer, paper) pairs under one shared
/// secret.
#[derive(Debug, Clone)]
pub struct UidGenerator {
    hashcode: String,
}

impl UidGenerator {
    pub fn new(hashcode: impl Into<String>) -> Self {
        Self {
            hashcode: hashcode.into(),
        }
    }

    /// Derive a fresh token for one (reviewer, paper) pair.
    ///
    /// Deliberately slow (PBKDF2 at its default work factor). The token is
    /// the tail of the PHC-encoded hash, which varies with the per-call
    /// salt. Truncated tokens may collide across pairs; the audit file, not
    /// the token, is authoritative for reverse lookup.
    pub fn derive(&self, reviewer: &str, paper: &str) -> Result<String, UidError> {
        let key = format!("{}{}{}", reviewer, self.hashcode, paper);
        let salt = SaltString::generate(&mut OsRng);
        let encoded = Pbkdf2
            .hash_password(key.as_bytes(), &salt)
            .map_err(UidError::Hash)?
            .to_string();
        // PHC strings are ASCII, so byte indexing is safe here.
        Ok(encoded[encoded.len() - UID_LEN..].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_fixed_length() {
        let generator = UidGenerator::new("secret");
        let token = generator.derive("a@univ.edu", "12").unwrap();
        assert_eq!(token.len(), UID_LEN);
    }

    #[test]
    fn identical_input_yields_fresh_tokens() {
        let generator = UidGenerator::new("secret");
        let first = generator.derive("a@univ.edu", "12").unwrap();
        let second = generator.derive("a@univ.edu", "12").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn token_is_plain_ascii() {
        let generator = UidGenerator::new("secret");
        let token = generator.derive("a@univ.edu", "12").unwrap();
        assert!(token.is_ascii());
        assert!(!token.contains(','), "token must be safe inside a CSV row");
    }
}
