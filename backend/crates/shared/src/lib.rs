//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - The unified [`error::app_error::AppError`] type and its [`error::kind::ErrorKind`]
//! - Typed identifiers ([`id::Id`]) for users, sessions and posts
//!
//! Anything placed here must mean the same thing in every domain.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
