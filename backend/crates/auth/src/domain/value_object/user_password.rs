//! User Password Value Object
//!
//! Stored password credential. Delegates hashing and verification to
//! `platform::password`.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};

/// Argon2id hash of a user's password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a clear-text password for storage
    pub fn from_clear_text(
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<Self, PasswordHashError> {
        password.hash(pepper).map(Self)
    }

    /// Restore from the stored PHC string
    pub fn from_db(phc: &str) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(password, pepper)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify() {
        let clear = ClearTextPassword::new("hunter2hunter2");
        let stored = UserPassword::from_clear_text(&clear, None).unwrap();

        assert!(stored.verify(&clear, None));
        assert!(!stored.verify(&ClearTextPassword::new("hunter3hunter3"), None));
    }

    #[test]
    fn test_db_roundtrip() {
        let clear = ClearTextPassword::new("hunter2hunter2");
        let stored = UserPassword::from_clear_text(&clear, None).unwrap();
        let restored = UserPassword::from_db(stored.as_phc_string()).unwrap();
        assert!(restored.verify(&clear, None));
    }

    #[test]
    fn test_debug_hides_hash() {
        let clear = ClearTextPassword::new("hunter2hunter2");
        let stored = UserPassword::from_clear_text(&clear, None).unwrap();
        assert!(!format!("{:?}", stored).contains("argon2"));
    }
}
