//! Password Hashing and Verification
//!
//! - Argon2id hashing with a fresh random salt per record
//! - Zeroization of clear-text passwords on drop
//! - Constant-time verification (inside `argon2`)
//! - Optional application-wide pepper
//!
//! Length policy is separate from [`ClearTextPassword`] construction so a
//! login attempt can be verified without being judged against the signup
//! rules.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters long")]
    TooLong { max: usize, actual: usize },

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Clear text password, NFKC normalized, zeroized on drop
///
/// Not `Clone` so copies cannot leak by accident.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Number of Unicode code points
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the signup policy (length bounds, no control characters)
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let actual = self.char_count();
        if actual < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual,
            });
        }
        if actual > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual,
            });
        }
        if self
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
        Ok(())
    }

    /// Constant-time equality, used for password/confirmation checks
    pub fn matches(&self, other: &ClearTextPassword) -> bool {
        let (a, b) = (self.0.as_bytes(), other.0.as_bytes());
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (OWASP defaults: m=19 MiB, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = self.peppered(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let result = Argon2::default()
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Argon2id hash in PHC string format (algorithm, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string read from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password; `pepper` must match the one used when hashing
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut bytes = password.peppered(pepper);
        let ok = Argon2::default().verify_password(&bytes, &parsed).is_ok();
        bytes.zeroize();
        ok
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_too_short() {
        let password = ClearTextPassword::new("short");
        assert!(matches!(
            password.check_policy(),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        ));
    }

    #[test]
    fn test_policy_too_long() {
        let password = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(
            password.check_policy(),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_policy_control_characters() {
        let password = ClearTextPassword::new("abc\u{0007}defgh");
        assert_eq!(
            password.check_policy(),
            Err(PasswordPolicyError::InvalidCharacter)
        );
    }

    #[test]
    fn test_policy_counts_code_points() {
        // 8 code points, 24 bytes
        let password = ClearTextPassword::new("パスワード安全!");
        assert_eq!(password.char_count(), 8);
        assert!(password.check_policy().is_ok());
    }

    #[test]
    fn test_matches() {
        let a = ClearTextPassword::new("correct horse");
        let b = ClearTextPassword::new("correct horse");
        let c = ClearTextPassword::new("correct horsf");
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!a.matches(&ClearTextPassword::new("correct")));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));
        assert!(!hashed.verify(&ClearTextPassword::new("WrongPassword123!"), None));
    }

    #[test]
    fn test_salt_is_per_record() {
        let password = ClearTextPassword::new("TestPassword123!");
        let first = password.hash(None).unwrap();
        let second = password.hash(None).unwrap();
        assert_ne!(first.as_phc_string(), second.as_phc_string());
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("TestPassword123!");
        let pepper = b"app_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = password.hash(None).unwrap();
        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret-value");
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("secret-value"));
    }
}
