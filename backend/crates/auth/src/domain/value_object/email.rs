//! Email Value Object
//!
//! A validated, normalized email address. Normalization follows the usual
//! webmail conventions so that aliases of one mailbox map to one account:
//!
//! - the whole address is trimmed and lower-cased
//! - `googlemail.com` becomes `gmail.com`; Gmail `+tag` suffixes are removed,
//!   dots are kept
//! - Outlook / Hotmail / Live and iCloud `+tag` suffixes are removed
//! - Yahoo `-tag` suffixes are removed

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length
const LOCAL_PART_MAX_LENGTH: usize = 64;

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];
const OUTLOOK_DOMAINS: &[&str] = &["outlook.com", "hotmail.com", "live.com"];
const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com", "mac.com"];
const YAHOO_DOMAINS: &[&str] = &["yahoo.com", "ymail.com", "rocketmail.com"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Please enter a valid email address.")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Validate and normalize user input
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if !Self::is_valid_format(trimmed) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(normalize(trimmed)))
    }

    /// Format check applied before normalization
    pub fn is_valid_format(email: &str) -> bool {
        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        if local.is_empty()
            || local.len() > LOCAL_PART_MAX_LENGTH
            || local.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }
        if domain.contains("..") {
            return false;
        }

        true
    }

    /// Create from database value (already normalized)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

/// Strip everything from the first `separator` on, unless that empties the
/// local part
fn strip_tag(local: &str, separator: char) -> &str {
    match local.split_once(separator) {
        Some((base, _)) if !base.is_empty() => base,
        _ => local,
    }
}

fn normalize(email: &str) -> String {
    let lowered = email.to_lowercase();
    let Some((local, domain)) = lowered.split_once('@') else {
        return lowered;
    };

    let (local, domain) = if GMAIL_DOMAINS.contains(&domain) {
        (strip_tag(local, '+'), "gmail.com")
    } else if OUTLOOK_DOMAINS.contains(&domain) || ICLOUD_DOMAINS.contains(&domain) {
        (strip_tag(local, '+'), domain)
    } else if YAHOO_DOMAINS.contains(&domain) {
        (strip_tag(local, '-'), domain)
    } else {
        (local, domain)
    };

    format!("{}@{}", local, domain)
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(raw: &str) -> String {
        Email::new(raw).unwrap().into_db()
    }

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("User@Example.COM").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        for raw in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "us er@example.com",
            "user@-example.com",
            "user@example.com.",
            "user@exa..mple.com",
        ] {
            assert_eq!(Email::new(raw), Err(EmailError::InvalidFormat), "{raw}");
        }
    }

    #[test]
    fn test_local_part_limit() {
        let local = "a".repeat(LOCAL_PART_MAX_LENGTH + 1);
        assert!(Email::new(&format!("{local}@example.com")).is_err());
    }

    #[test]
    fn test_case_is_folded() {
        assert_eq!(normalized("User@Example.com"), normalized("user@example.com"));
        assert_eq!(normalized("User@Example.COM"), "user@example.com");
    }

    #[test]
    fn test_gmail_keeps_dots_drops_tag() {
        assert_eq!(normalized("John.Doe+news@gmail.com"), "john.doe@gmail.com");
        assert_eq!(normalized("john.doe@googlemail.com"), "john.doe@gmail.com");
    }

    #[test]
    fn test_provider_specific_tags() {
        assert_eq!(normalized("me+x@outlook.com"), "me@outlook.com");
        assert_eq!(normalized("me+x@hotmail.com"), "me@hotmail.com");
        assert_eq!(normalized("me+x@icloud.com"), "me@icloud.com");
        assert_eq!(normalized("me-x@yahoo.com"), "me@yahoo.com");
        // Other domains keep their tags
        assert_eq!(normalized("me+x@example.com"), "me+x@example.com");
        assert_eq!(normalized("me-x@example.com"), "me-x@example.com");
    }

    #[test]
    fn test_tag_only_local_is_kept() {
        assert_eq!(normalized("+x@gmail.com"), "+x@gmail.com");
    }

    #[test]
    fn test_email_display() {
        let email = Email::new("User@Example.com").unwrap();
        assert_eq!(email.to_string(), "user@example.com");
        assert_eq!(email.as_str(), "user@example.com");
    }
}
