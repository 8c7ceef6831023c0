//! Application Error
//!
//! [`AppError`] is the error every crate eventually converts into before a
//! failure leaves the process boundary as an HTTP response.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified application error
///
/// ```rust
/// use kernel::error::app_error::AppError;
/// use kernel::error::kind::ErrorKind;
///
/// let err = AppError::new(ErrorKind::Conflict, "Account already exists");
/// assert_eq!(err.status_code(), 409);
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    /// User-facing message
    message: Cow<'static, str>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {}
