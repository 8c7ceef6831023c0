//! Sign Up Use Case
//!
//! Creates a new local-password account and signs it in.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session_binding::SessionBinding;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
}

struct ValidSignUp {
    user_name: UserName,
    email: Email,
    password: ClearTextPassword,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    binding: SessionBinding<U, S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            binding: SessionBinding::new(user_repo.clone(), session_repo, config.clone()),
            user_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let ValidSignUp {
            user_name,
            email,
            password,
        } = Self::validate(input)?;

        if self
            .user_repo
            .find_by_email_or_user_name(&email, &user_name)
            .await?
            .is_some()
        {
            return Err(AuthError::AccountExists);
        }

        let hashed = UserPassword::from_clear_text(&password, self.config.pepper())?;
        let user = User::new(user_name, email, Some(hashed));

        // A concurrent signup can still win the race; the store reports
        // that as AccountExists too
        self.user_repo.create(&user).await?;

        let session_token = self.binding.establish(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            session_token,
        })
    }

    /// Collect every violation before rejecting
    fn validate(input: SignUpInput) -> AuthResult<ValidSignUp> {
        let mut errors = Vec::new();

        let email = Email::new(&input.email).map_err(|e| errors.push(e.to_string()));

        let password = ClearTextPassword::new(input.password);
        if let Err(e) = password.check_policy() {
            errors.push(e.to_string());
        }

        let confirm = ClearTextPassword::new(input.confirm_password);
        if !password.matches(&confirm) {
            errors.push(PASSWORD_MISMATCH_MESSAGE.to_string());
        }

        let user_name = UserName::new(&input.user_name).map_err(|e| errors.push(e.to_string()));

        match (email, user_name) {
            (Ok(email), Ok(user_name)) if errors.is_empty() => Ok(ValidSignUp {
                user_name,
                email,
                password,
            }),
            _ => Err(AuthError::Validation(errors)),
        }
    }
}
