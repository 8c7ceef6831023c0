//! Posts Backend Module
//!
//! Image posts: upload to an external media host, persist, like, delete.
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, media gateway and repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL store, Cloudinary gateway
//! - `presentation/` - HTTP handlers, multipart parsing, views, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{CloudinaryConfig, PostsConfig};
pub use error::{PostError, PostResult};
pub use infra::{cloudinary::CloudinaryGateway, postgres::PgPostRepository};
pub use presentation::router::{posts_router, posts_router_generic};
