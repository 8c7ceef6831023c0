//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use posts::{CloudinaryConfig, PostsConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:2121";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MEDIA_TIMEOUT_SECS: u64 = 30;

pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub posts: PostsConfig,
    pub cloudinary: CloudinaryConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |name: &str| get(name).with_context(|| format!("{name} must be set"));

        let auth = match get("SESSION_SECRET") {
            Some(encoded) => AuthConfig {
                cookie_secure: !cfg!(debug_assertions),
                ..AuthConfig::with_secret(decode_secret(&encoded)?)
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
                AuthConfig::development()
            }
            None => return Err(anyhow!("SESSION_SECRET must be set in production")),
        };

        let cloudinary = CloudinaryConfig {
            folder: get("CLOUDINARY_FOLDER").filter(|f| !f.is_empty()),
            timeout: Duration::from_secs(parsed_or(
                &get,
                "MEDIA_TIMEOUT_SECS",
                DEFAULT_MEDIA_TIMEOUT_SECS,
            )?),
            ..CloudinaryConfig::new(
                required("CLOUDINARY_CLOUD_NAME")?,
                required("CLOUDINARY_API_KEY")?,
                required("CLOUDINARY_API_SECRET")?,
            )
        };

        let posts = PostsConfig {
            max_upload_bytes: parsed_or(
                &get,
                "MAX_UPLOAD_BYTES",
                PostsConfig::default().max_upload_bytes,
            )?,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: parsed_or(&get, "BIND_ADDR", SocketAddr::from_str(DEFAULT_BIND_ADDR)?)?,
            database_max_connections: parsed_or(
                &get,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            auth,
            posts,
            cloudinary,
        })
    }
}

fn parsed_or<T>(get: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

/// Standard base64 encoding of exactly 32 bytes
fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("SESSION_SECRET is not valid base64")?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}
