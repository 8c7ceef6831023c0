//! Like Post Use Case

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

pub struct LikePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> LikePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Add exactly one like, returning the new count
    pub async fn execute(&self, post_id: &PostId) -> PostResult<i64> {
        let likes = self
            .post_repo
            .increment_likes(post_id)
            .await?
            .ok_or(PostError::NotFound)?;

        tracing::info!(post_id = %post_id, likes, "Likes +1");
        Ok(likes)
    }
}
