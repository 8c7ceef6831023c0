//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, middleware and views.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use handlers::AuthAppState;
pub use middleware::{AuthUser, CurrentUser, MaybeUser, load_session, require_auth};
pub use router::{auth_router, auth_router_generic, with_session};
