//! Presentation Layer
//!
//! HTTP handlers, multipart parsing, views and router.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod views;

pub use handlers::PostsAppState;
pub use router::{posts_router, posts_router_generic};
