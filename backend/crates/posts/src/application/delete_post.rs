//! Delete Post Use Case
//!
//! Only the owner may delete. The hosted asset is released before the
//! record is removed, so a failed release leaves the post intact.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::media::MediaGateway;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

pub struct DeletePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaGateway,
{
    post_repo: Arc<P>,
    media: Arc<M>,
}

impl<P, M> DeletePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaGateway,
{
    pub fn new(post_repo: Arc<P>, media: Arc<M>) -> Self {
        Self { post_repo, media }
    }

    pub async fn execute(&self, post_id: &PostId, user_id: &UserId) -> PostResult<()> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostError::NotFound)?;

        if !post.is_owned_by(user_id) {
            return Err(PostError::NotOwner);
        }

        self.media.destroy(&post.media_public_id).await?;

        if !self.post_repo.delete(post_id).await? {
            // Removed concurrently
            return Err(PostError::NotFound);
        }

        tracing::info!(post_id = %post_id, user_id = %user_id, "Deleted Post");
        Ok(())
    }
}
