//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::flash::FlashCookies;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Cookie remembering the protected page an anonymous visit was bounced from
    pub return_to_cookie_name: String,
    /// Application secret for HMAC signing of session and flash cookies (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            return_to_cookie_name: "return_to".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(14 * 24 * 3600), // 2 weeks
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(session_secret: [u8; 32]) -> Self {
        Self {
            session_secret,
            ..Default::default()
        }
    }

    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self::with_secret(platform::crypto::random_secret())
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Attributes of the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.session_ttl.as_secs()),
            ..CookieConfig::named(&self.session_cookie_name)
        }
    }

    /// Attributes of the return-path cookie (browser-session lifetime)
    pub fn return_to_cookie(&self) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::named(&self.return_to_cookie_name)
        }
    }

    /// Flash cookie codec signed with the session secret
    pub fn flash(&self) -> FlashCookies {
        FlashCookies::new(self.session_secret, self.cookie_secure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_is_insecure_and_random() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = AuthConfig::with_secret([1u8; 32]);
        let cookie = config.session_cookie().build_set_cookie("token");
        assert!(cookie.starts_with("session=token"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains(&format!("Max-Age={}", config.session_ttl.as_secs())));
    }

    #[test]
    fn test_return_to_cookie_has_no_max_age() {
        let cookie = AuthConfig::development()
            .return_to_cookie()
            .build_set_cookie("/feed");
        assert!(cookie.starts_with("return_to=/feed"));
        assert!(!cookie.contains("Max-Age"));
    }
}
