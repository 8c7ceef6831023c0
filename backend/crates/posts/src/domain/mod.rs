//! Domain Layer
//!
//! Post entity, media gateway and repository traits.

pub mod entity;
pub mod media;
pub mod repository;

// Re-exports
pub use entity::post::Post;
pub use media::{MediaGateway, MediaUpload, UploadedMedia};
pub use repository::PostRepository;
