//! Posts Error Types
//!
//! Post-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Shown for store and media host failures
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Posts result type alias
pub type PostResult<T> = Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    /// No file in the upload form
    #[error("Please choose an image to upload.")]
    MissingFile,

    /// File extension outside the accepted image types
    #[error("Only jpg, jpeg, png, gif and webp images are allowed.")]
    UnsupportedFileType,

    /// Multipart body could not be read
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Post not found.")]
    NotFound,

    /// Acting user does not own the post
    #[error("You can only delete your own posts.")]
    NotOwner,

    /// Media host answered with an error
    #[error("Media host error: {0}")]
    Media(String),

    /// Media host unreachable or response unreadable
    #[error("Media host request failed: {0}")]
    MediaTransport(#[from] reqwest::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PostError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PostError::MissingFile | PostError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            PostError::UnsupportedFileType => StatusCode::UNPROCESSABLE_ENTITY,
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::NotOwner => StatusCode::FORBIDDEN,
            PostError::Media(_) | PostError::MediaTransport(_) => StatusCode::BAD_GATEWAY,
            PostError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::MissingFile | PostError::InvalidUpload(_) => ErrorKind::BadRequest,
            PostError::UnsupportedFileType => ErrorKind::UnprocessableEntity,
            PostError::NotFound => ErrorKind::NotFound,
            PostError::NotOwner => ErrorKind::Forbidden,
            PostError::Media(_) | PostError::MediaTransport(_) => ErrorKind::BadGateway,
            PostError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.kind().is_server_error()
    }

    /// Message to flash after a failed form action
    pub fn flash_message(&self) -> String {
        if self.is_internal() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.flash_message())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            PostError::Database(e) => {
                tracing::error!(error = %e, "Posts database error");
            }
            PostError::Media(msg) => {
                tracing::error!(message = %msg, "Media host error");
            }
            PostError::MediaTransport(e) => {
                tracing::error!(error = %e, "Media host request failed");
            }
            PostError::NotOwner => {
                tracing::warn!("Post deletion by non-owner refused");
            }
            _ => {
                tracing::debug!(error = %self, "Posts request rejected");
            }
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
