//! Local Authentication Strategy
//!
//! Verifies an (email, password) pair against the credential store.
//! Read-only: no session is created here.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Email + password strategy
pub struct LocalStrategy<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LocalStrategy<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Resolve the principal for `email` if `password` matches
    ///
    /// Rejections are `EmailNotFound`, `NoLocalPassword` and
    /// `InvalidCredentials`; store failures propagate unchanged.
    pub async fn authenticate(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::EmailNotFound(email.to_string()))?;

        let Some(stored) = &user.password else {
            return Err(AuthError::NoLocalPassword);
        };

        if !stored.verify(password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}
