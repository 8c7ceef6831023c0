//! Create Post Use Case
//!
//! Upload first, then persist. If persisting fails the uploaded asset is
//! destroyed so the host keeps no orphan.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::media::{MediaGateway, MediaUpload};
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

pub struct CreatePostInput {
    pub title: String,
    pub caption: String,
    pub file: Option<MediaUpload>,
    pub user_id: UserId,
}

pub struct CreatePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaGateway,
{
    post_repo: Arc<P>,
    media: Arc<M>,
}

impl<P, M> CreatePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaGateway,
{
    pub fn new(post_repo: Arc<P>, media: Arc<M>) -> Self {
        Self { post_repo, media }
    }

    pub async fn execute(&self, input: CreatePostInput) -> PostResult<Post> {
        let file = input.file.ok_or(PostError::MissingFile)?;
        if !file.has_allowed_extension() {
            return Err(PostError::UnsupportedFileType);
        }

        let uploaded = self.media.upload(file).await?;
        let post = Post::new(input.title, input.caption, uploaded, input.user_id);

        if let Err(e) = self.post_repo.create(&post).await {
            if let Err(cleanup) = self.media.destroy(&post.media_public_id).await {
                tracing::warn!(
                    error = %cleanup,
                    public_id = %post.media_public_id,
                    "Failed to release asset of unsaved post"
                );
            }
            return Err(e);
        }

        tracing::info!(
            post_id = %post.post_id,
            user_id = %post.user_id,
            "Post has been added"
        );

        Ok(post)
    }
}
