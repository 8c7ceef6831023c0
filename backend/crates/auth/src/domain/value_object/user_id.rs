pub use kernel::id::{SessionId, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_new() {
        let user_id = UserId::new();
        assert_eq!(user_id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let user_id = UserId::from_uuid(uuid);
        assert_eq!(user_id.as_uuid(), &uuid);
    }

    #[test]
    fn test_session_id_parses_display() {
        let session_id = SessionId::new();
        let parsed: SessionId = session_id.to_string().parse().unwrap();
        assert_eq!(parsed, session_id);
    }
}
