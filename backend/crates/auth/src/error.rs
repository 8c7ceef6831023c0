//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Shown for store and other unexpected failures in form flows
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Form input violations, in the order they were found
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// No account for the (normalized) email
    #[error("Email {0} not found.")]
    EmailNotFound(String),

    /// Account exists but was registered through a sign-in provider
    #[error(
        "Your account was registered using a sign-in provider. To enable password login, \
         sign in using a provider, and then set a password under your user profile."
    )]
    NoLocalPassword,

    /// Wrong password
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Email or user name already taken
    #[error("Account with that email address or username already exists.")]
    AccountExists,

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailNotFound(_)
            | AuthError::NoLocalPassword
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountExists => StatusCode::CONFLICT,
            AuthError::PasswordHash(_) | AuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailNotFound(_)
            | AuthError::NoLocalPassword
            | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::AccountExists => ErrorKind::Conflict,
            AuthError::PasswordHash(_) | AuthError::Database(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the failure is the store's or the process's, not the user's
    pub fn is_internal(&self) -> bool {
        self.kind().is_server_error()
    }

    /// Messages to flash back to the form
    pub fn flash_messages(&self) -> Vec<String> {
        match self {
            AuthError::Validation(messages) => messages.clone(),
            _ if self.is_internal() => vec![GENERIC_ERROR_MESSAGE.to_string()],
            _ => vec![self.to_string()],
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        if self.is_internal() {
            // Internal details stay in the log
            return AppError::new(self.kind(), GENERIC_ERROR_MESSAGE);
        }
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Auth password hashing error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth rejected");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
