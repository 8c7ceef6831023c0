//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the feature crates:
//! - Password hashing (Argon2id, per-record salt)
//! - Signed tokens (HMAC-SHA256) and random secrets
//! - Cookie building / parsing
//! - Flash messages carried across redirects
//! - Small HTML helpers for server-rendered views

pub mod cookie;
pub mod crypto;
pub mod flash;
pub mod html;
pub mod password;
