//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{
    email::Email,
    user_id::{SessionId, UserId},
    user_name::UserName,
};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A unique-key violation maps to `AuthError::AccountExists`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Any user matching either the email or the user name
    async fn find_by_email_or_user_name(
        &self,
        email: &Email,
        user_name: &UserName,
    ) -> AuthResult<Option<User>>;
}

/// Session store
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> AuthResult<()>;

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Update last activity
    async fn touch(&self, session_id: &SessionId) -> AuthResult<()>;

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Remove expired sessions, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
