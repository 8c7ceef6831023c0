//! Session Entity
//!
//! Server-side session row. The cookie only carries its signed identifier.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::user_id::{SessionId, UserId};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: SessionId,
    /// Reference to User
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for `user_id`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = Session::new(UserId::new(), Duration::hours(1));
        assert!(!session.is_expired());
        assert!(session.expires_at_ms > session.created_at.timestamp_millis());
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let session = Session::new(UserId::new(), Duration::seconds(-1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_touch_moves_last_activity() {
        let mut session = Session::new(UserId::new(), Duration::hours(1));
        let before = session.last_activity_at;
        session.touch();
        assert!(session.last_activity_at >= before);
    }
}
