//! Repository Traits

use kernel::id::{PostId, UserId};

use crate::domain::entity::post::Post;
use crate::error::PostResult;

/// Post store
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn create(&self, post: &Post) -> PostResult<()>;

    async fn find_by_id(&self, post_id: &PostId) -> PostResult<Option<Post>>;

    /// Posts owned by `user_id`, newest first
    async fn find_by_user(&self, user_id: &UserId) -> PostResult<Vec<Post>>;

    /// All posts, newest first
    async fn find_all_newest_first(&self) -> PostResult<Vec<Post>>;

    /// Atomically add one like; `None` if the post does not exist
    async fn increment_likes(&self, post_id: &PostId) -> PostResult<Option<i64>>;

    /// Returns whether a row was removed
    async fn delete(&self, post_id: &PostId) -> PostResult<bool>;
}
