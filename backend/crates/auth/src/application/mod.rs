//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod session_binding;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod strategy;

// Re-exports
pub use config::AuthConfig;
pub use session_binding::SessionBinding;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use strategy::LocalStrategy;
