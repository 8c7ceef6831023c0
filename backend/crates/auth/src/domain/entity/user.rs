//! User Entity
//!
//! Persisted account record. Created at signup and never mutated afterwards.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display handle (unique)
    pub user_name: UserName,
    /// Normalized email address (unique, used for login)
    pub email: Email,
    /// `None` for accounts registered through a sign-in provider
    pub password: Option<UserPassword>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, email: Email, password: Option<UserPassword>) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password,
            created_at: Utc::now(),
        }
    }

    /// Whether the account can sign in with a password
    pub fn has_local_password(&self) -> bool {
        self.password.is_some()
    }
}
