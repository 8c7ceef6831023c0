//! Post Entity
//!
//! An image post. `image_url` and `media_public_id` always name the same
//! hosted asset; removing the post must release that asset too.

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::media::UploadedMedia;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    /// Hosted image (`secure_url` from the media host)
    pub image_url: String,
    /// Deletion handle at the media host
    pub media_public_id: String,
    pub caption: String,
    /// Never negative
    pub likes: i64,
    /// Owner
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// New post with zero likes, referencing an already uploaded asset
    pub fn new(
        title: impl Into<String>,
        caption: impl Into<String>,
        media: UploadedMedia,
        user_id: UserId,
    ) -> Self {
        Self {
            post_id: PostId::new(),
            title: title.into(),
            image_url: media.secure_url,
            media_public_id: media.public_id,
            caption: caption.into(),
            likes: 0,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
