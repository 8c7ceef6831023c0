//! Cloudinary Media Gateway
//!
//! Signed REST calls against `/v1_1/{cloud}/image/{upload,destroy}`. The
//! signature is the hex SHA-1 of the alphabetically sorted `key=value`
//! parameters joined with `&`, followed by the API secret.

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};

use crate::application::config::CloudinaryConfig;
use crate::domain::media::{MediaGateway, MediaUpload, UploadedMedia};
use crate::error::{PostError, PostResult};

#[derive(Clone)]
pub struct CloudinaryGateway {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryGateway {
    pub fn new(config: CloudinaryConfig) -> PostResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        api_signature(params, &self.config.api_secret)
    }
}

/// Hex SHA-1 over the sorted parameters and the secret
pub fn api_signature(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Decode a success body, or turn an error body into `PostError::Media`
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> PostResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_else(|_| "no error detail".to_string());
    Err(PostError::Media(format!("{}: {}", status, message)))
}

impl MediaGateway for CloudinaryGateway {
    async fn upload(&self, upload: MediaUpload) -> PostResult<UploadedMedia> {
        let mut params = vec![("timestamp", Utc::now().timestamp().to_string())];
        if let Some(folder) = &self.config.folder {
            params.push(("folder", folder.clone()));
        }
        let signature = self.sign(&params);

        let size = upload.bytes.len();
        // The host sniffs the image type itself
        let part = Part::bytes(upload.bytes).file_name(upload.file_name);

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.config.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = read_json(response).await?;

        tracing::info!(public_id = %uploaded.public_id, bytes = size, "Uploaded image");

        Ok(UploadedMedia {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> PostResult<()> {
        let params = vec![
            ("public_id", public_id.to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
        ];
        let signature = self.sign(&params);

        let mut body: Vec<(&str, String)> = params;
        body.push(("api_key", self.config.api_key.clone()));
        body.push(("signature", signature));

        let response = self
            .client
            .post(self.config.endpoint("destroy"))
            .form(&body)
            .send()
            .await?;
        let result: DestroyResponse = read_json(response).await?;

        match result.result.as_str() {
            "ok" => {
                tracing::info!(public_id = %public_id, "Destroyed image");
                Ok(())
            }
            "not found" => {
                tracing::debug!(public_id = %public_id, "Image already gone");
                Ok(())
            }
            other => Err(PostError::Media(format!(
                "destroy of {} returned {}",
                public_id, other
            ))),
        }
    }
}
