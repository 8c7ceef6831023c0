//! Application Layer
//!
//! Use cases and configuration.

pub mod config;
pub mod create_post;
pub mod delete_post;
pub mod like_post;
pub mod view_posts;

// Re-exports
pub use config::{CloudinaryConfig, PostsConfig};
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use like_post::LikePostUseCase;
pub use view_posts::ViewPostsUseCase;
