//! Read-side queries for the profile, feed and post pages

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::PostResult;

pub struct ViewPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> ViewPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Posts owned by `user_id`
    pub async fn profile(&self, user_id: &UserId) -> PostResult<Vec<Post>> {
        self.post_repo.find_by_user(user_id).await
    }

    /// Every post, newest first
    pub async fn feed(&self) -> PostResult<Vec<Post>> {
        self.post_repo.find_all_newest_first().await
    }

    pub async fn post(&self, post_id: &PostId) -> PostResult<Option<Post>> {
        self.post_repo.find_by_id(post_id).await
    }
}
