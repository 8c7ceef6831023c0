//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::PostResult;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "post_id, title, image_url, media_public_id, caption, likes, user_id, created_at";

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> PostResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                image_url,
                media_public_id,
                caption,
                likes,
                user_id,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.image_url)
        .bind(&post.media_public_id)
        .bind(&post.caption)
        .bind(post.likes)
        .bind(post.user_id.as_uuid())
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> PostResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn find_by_user(&self, user_id: &UserId) -> PostResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_all_newest_first(&self) -> PostResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn increment_likes(&self, post_id: &PostId) -> PostResult<Option<i64>> {
        // Single statement: concurrent likes serialize on the row lock
        let likes = sqlx::query_scalar::<_, i64>(
            "UPDATE posts SET likes = likes + 1 WHERE post_id = $1 RETURNING likes",
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn delete(&self, post_id: &PostId) -> PostResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    image_url: String,
    media_public_id: String,
    caption: String,
    likes: i64,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            title: self.title,
            image_url: self.image_url,
            media_public_id: self.media_public_id,
            caption: self.caption,
            likes: self.likes,
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
        }
    }
}
