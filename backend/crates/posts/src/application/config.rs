//! Posts Configuration

use std::time::Duration;

/// HTTP-facing limits for the posts routes
#[derive(Debug, Clone)]
pub struct PostsConfig {
    /// Multipart body limit for uploads
    pub max_upload_bytes: usize,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }
}

/// Credentials and endpoint of the Cloudinary media host
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Optional folder uploads are placed in
    pub folder: Option<String>,
    /// Base URL of the REST API
    pub api_base: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            folder: None,
            api_base: "https://api.cloudinary.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        }
    }

    /// `{api_base}/v1_1/{cloud_name}/image/{action}`
    pub fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.api_base.trim_end_matches('/'),
            self.cloud_name,
            action
        )
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("folder", &self.folder)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let config = CloudinaryConfig::new("demo", "key", "secret");
        assert_eq!(
            config.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );

        let local = CloudinaryConfig {
            api_base: "http://127.0.0.1:9000/".to_string(),
            ..config
        };
        assert_eq!(
            local.endpoint("destroy"),
            "http://127.0.0.1:9000/v1_1/demo/image/destroy"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = CloudinaryConfig::new("demo", "key", "very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }
}
