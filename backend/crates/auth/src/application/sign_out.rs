//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_binding::SessionBinding;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    binding: SessionBinding<U, S>,
}

impl<U, S> SignOutUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            binding: SessionBinding::new(user_repo, session_repo, config),
        }
    }

    /// Sign out from current session
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        self.binding.destroy(session_token).await?;
        tracing::info!("User signed out");
        Ok(())
    }
}
