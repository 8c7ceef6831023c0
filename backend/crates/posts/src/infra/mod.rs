//! Infrastructure Layer
//!
//! PostgreSQL store and the Cloudinary media gateway.

pub mod cloudinary;
pub mod postgres;

pub use cloudinary::CloudinaryGateway;
pub use postgres::PgPostRepository;
