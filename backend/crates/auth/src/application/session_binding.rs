//! Session Binding
//!
//! Maps an authenticated user to a server-side session and back. The cookie
//! value is `<session_id>.<base64url(hmac-sha256(session_id))>`.

use std::sync::Arc;

use chrono::Duration;
use platform::crypto;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::user_id::SessionId;
use crate::error::AuthResult;

pub struct SessionBinding<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SessionBinding<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Store a new session for `user` and return the signed cookie token
    pub async fn establish(&self, user: &User) -> AuthResult<String> {
        let ttl = Duration::milliseconds(self.config.session_ttl_ms());
        let session = Session::new(user.user_id, ttl);
        self.session_repo.create(&session).await?;

        tracing::debug!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "Session established"
        );

        Ok(self.sign(&session.session_id))
    }

    /// Resolve a cookie token back to its user
    ///
    /// Bad signatures, unknown or expired sessions and vanished users all
    /// yield `Ok(None)`; only store failures are errors.
    pub async fn resolve(&self, token: &str) -> AuthResult<Option<User>> {
        let Some(session_id) = self.parse_token(token) else {
            return Ok(None);
        };

        let Some(session) = self.session_repo.find_by_id(&session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            if let Err(e) = self.session_repo.delete(&session_id).await {
                tracing::warn!(error = %e, session_id = %session_id, "Failed to delete expired session");
            }
            return Ok(None);
        }

        if let Err(e) = self.session_repo.touch(&session_id).await {
            tracing::warn!(error = %e, session_id = %session_id, "Failed to update session activity");
        }

        self.user_repo.find_by_id(&session.user_id).await
    }

    /// Delete the session referenced by `token`, if the token is genuine
    pub async fn destroy(&self, token: &str) -> AuthResult<()> {
        match self.parse_token(token) {
            Some(session_id) => {
                self.session_repo.delete(&session_id).await?;
                tracing::debug!(session_id = %session_id, "Session destroyed");
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn sign(&self, session_id: &SessionId) -> String {
        crypto::sign(&self.config.session_secret, &session_id.to_string())
    }

    /// Verify signature and parse the session id
    pub fn parse_token(&self, token: &str) -> Option<SessionId> {
        crypto::verify(&self.config.session_secret, token)?
            .parse()
            .ok()
    }
}
