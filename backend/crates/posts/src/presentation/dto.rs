//! Upload form parsing

use axum::extract::Multipart;
use kernel::id::UserId;

use crate::application::create_post::CreatePostInput;
use crate::domain::media::MediaUpload;
use crate::error::{PostError, PostResult};

/// Fields of the create-post multipart form (`title`, `caption`, `file`)
#[derive(Debug, Default)]
pub struct CreatePostForm {
    pub title: String,
    pub caption: String,
    pub file: Option<MediaUpload>,
}

impl CreatePostForm {
    /// Read every field; an empty file input counts as no file
    pub async fn from_multipart(mut multipart: Multipart) -> PostResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| PostError::InvalidUpload(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = read_text(field).await?,
                "caption" => form.caption = read_text(field).await?,
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| PostError::InvalidUpload(e.body_text()))?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.file = Some(MediaUpload {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn into_input(self, user_id: UserId) -> CreatePostInput {
        CreatePostInput {
            title: self.title.trim().to_string(),
            caption: self.caption.trim().to_string(),
            file: self.file,
            user_id,
        }
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> PostResult<String> {
    field
        .text()
        .await
        .map_err(|e| PostError::InvalidUpload(e.body_text()))
}
