//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Authentication strategy, session binding, use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, views, router
//!
//! ## Features
//! - Signup / login with email + password, logout
//! - Server-side sessions referenced by an HMAC-signed cookie
//! - Flash messages for form feedback
//! - Return to the originally requested page after login
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (per-record salt, optional pepper)
//! - Emails normalized so aliases of one mailbox share one account
//! - Return paths restricted to same-origin paths

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult, GENERIC_ERROR_MESSAGE};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, with_session};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod repository {
    pub use crate::domain::repository::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
