//! Status endpoints: show, destroy, retweet, and update.
//!
//! `update` is the one adapter with conditional behavior: when a media
//! attachment is present the request goes to `statuses/update_with_media`
//! through the `upload` subdomain as a multipart POST.

use crate::errors::TwitterResult;
use crate::request::{RequestPipeline, ResponseValue};
use crate::transport::{FileUpload, Params};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

/// Multipart field name the API expects for media attachments
pub const MEDIA_FIELD: &str = "media[]";

/// Media attachment for a status update
#[derive(Debug, Clone)]
pub enum Media {
    /// A file-system path, read into bytes at request time
    Path(PathBuf),
    /// In-memory content with an explicit file name
    Bytes {
        /// File name presented to the server
        file_name: String,
        /// File content
        content: Bytes,
    },
}

impl Media {
    async fn into_upload(self) -> TwitterResult<FileUpload> {
        match self {
            Media::Path(path) => FileUpload::from_path(MEDIA_FIELD, path).await,
            Media::Bytes { file_name, content } => {
                Ok(FileUpload::new(MEDIA_FIELD, file_name, content))
            }
        }
    }
}

/// Request to post a status update
#[derive(Debug, Clone)]
pub struct UpdateStatusRequest {
    status: String,
    media: Option<Media>,
    extra: Params,
}

impl UpdateStatusRequest {
    /// Create a new status update
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            media: None,
            extra: Params::new(),
        }
    }

    /// Attach media from a file-system path
    pub fn media_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.media = Some(Media::Path(path.into()));
        self
    }

    /// Attach in-memory media content
    pub fn media_bytes(mut self, file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.media = Some(Media::Bytes {
            file_name: file_name.into(),
            content: content.into(),
        });
        self
    }

    /// Add an arbitrary API parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra = self.extra.push(key, value);
        self
    }
}

/// Trait for status operations
#[async_trait]
pub trait StatusesServiceTrait: Send + Sync {
    /// Fetch a single status by ID
    async fn show(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue>;

    /// Up to 100 of the first retweets of the given status
    async fn retweets(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue>;

    /// Users who retweeted the status; IDs only when `only_ids` is set
    async fn retweeted_by(
        &self,
        status_id: u64,
        only_ids: bool,
        params: Params,
    ) -> TwitterResult<ResponseValue>;

    /// Delete a status authored by the authenticating user
    async fn destroy(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue>;

    /// Retweet a status
    async fn retweet(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue>;

    /// Post a status update, optionally with a media attachment
    async fn update(&self, request: UpdateStatusRequest) -> TwitterResult<ResponseValue>;
}

/// Statuses service implementation
#[derive(Clone)]
pub struct StatusesService {
    pipeline: Arc<RequestPipeline>,
}

impl StatusesService {
    /// Create a new statuses service
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl StatusesServiceTrait for StatusesService {
    #[instrument(skip(self, params))]
    async fn show(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue> {
        self.pipeline
            .request(Method::GET, &format!("statuses/show/{status_id}"), params)
            .await
    }

    #[instrument(skip(self, params))]
    async fn retweets(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue> {
        self.pipeline
            .request(Method::GET, &format!("statuses/retweets/{status_id}"), params)
            .await
    }

    #[instrument(skip(self, params))]
    async fn retweeted_by(
        &self,
        status_id: u64,
        only_ids: bool,
        params: Params,
    ) -> TwitterResult<ResponseValue> {
        let path = if only_ids {
            format!("statuses/{status_id}/retweeted_by/ids")
        } else {
            format!("statuses/{status_id}/retweeted_by")
        };
        self.pipeline.request(Method::GET, &path, params).await
    }

    #[instrument(skip(self, params))]
    async fn destroy(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue> {
        self.pipeline
            .request(Method::POST, &format!("statuses/destroy/{status_id}"), params)
            .await
    }

    #[instrument(skip(self, params))]
    async fn retweet(&self, status_id: u64, params: Params) -> TwitterResult<ResponseValue> {
        self.pipeline
            .request(Method::POST, &format!("statuses/retweet/{status_id}"), params)
            .await
    }

    #[instrument(skip(self, request))]
    async fn update(&self, request: UpdateStatusRequest) -> TwitterResult<ResponseValue> {
        let mut params = request.extra;
        // Named argument wins over any caller-supplied "status" extra.
        params.insert("status", request.status);

        match request.media {
            Some(media) => {
                let upload = media.into_upload().await?;
                self.pipeline
                    .request_with(
                        Method::POST,
                        "statuses/update_with_media",
                        params,
                        vec![upload],
                        crate::UPLOAD_SUBDOMAIN,
                    )
                    .await
            }
            None => {
                self.pipeline
                    .request(Method::POST, "statuses/update", params)
                    .await
            }
        }
    }
}

impl std::fmt::Debug for StatusesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusesService").finish()
    }
}
