//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_id::{SessionId, UserId},
    user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

const USER_COLUMNS: &str = "user_id, user_name, email, password_hash, created_at";

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::AccountExists
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email_or_user_name(
        &self,
        email: &Email,
        user_name: &UserName,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR user_name = $2 LIMIT 1"
        ))
        .bind(email.as_str())
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn touch(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("UPDATE sessions SET last_activity_at = $2 WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = self
            .password_hash
            .as_deref()
            .map(UserPassword::from_db)
            .transpose()?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            password,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
