//! Sign In Use Case
//!
//! Validates the login form, authenticates through [`LocalStrategy`] and
//! binds a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session_binding::SessionBinding;
use crate::application::strategy::LocalStrategy;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::{Email, EmailError};
use crate::error::{AuthError, AuthResult};

pub const BLANK_PASSWORD_MESSAGE: &str = "Password cannot be blank.";

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    strategy: LocalStrategy<U>,
    binding: SessionBinding<U, S>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            strategy: LocalStrategy::new(user_repo.clone(), config.clone()),
            binding: SessionBinding::new(user_repo, session_repo, config),
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let (email, password) = Self::validate(input)?;

        let user = self.strategy.authenticate(&email, &password).await?;
        let session_token = self.binding.establish(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user,
            session_token,
        })
    }

    /// Collect every violation before rejecting
    fn validate(input: SignInInput) -> AuthResult<(Email, ClearTextPassword)> {
        let mut errors = Vec::new();

        let email = Email::new(&input.email);
        if email.is_err() {
            errors.push(EmailError::InvalidFormat.to_string());
        }

        let password = ClearTextPassword::new(input.password);
        if password.is_empty() {
            errors.push(BLANK_PASSWORD_MESSAGE.to_string());
        }

        match email {
            Ok(email) if errors.is_empty() => Ok((email, password)),
            _ => Err(AuthError::Validation(errors)),
        }
    }
}
