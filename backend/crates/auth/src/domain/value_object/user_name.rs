//! User Name Value Object
//!
//! Display handle chosen at signup. NFKC normalized and trimmed; uniqueness
//! is exact-match on the stored value.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be blank.")]
    Blank,

    #[error("User name must be at most {max} characters long")]
    TooLong { max: usize },

    #[error("User name contains invalid characters")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: &str) -> Result<Self, UserNameError> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Blank);
        }
        if trimmed.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(user_name: impl Into<String>) -> Self {
        Self(user_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}
