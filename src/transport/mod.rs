//! HTTP transport layer for the Twitter client.
//!
//! The transport is a black box to the rest of the crate: it takes a fully
//! built request description and returns the raw status code and body.
//! Status interpretation belongs to the request pipeline, not here.

use crate::errors::{TwitterError, TwitterResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use reqwest::{Client, ClientBuilder};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Ordered multimap of request parameters
///
/// Keys map to strings or, by repeating a key, to lists. Endpoint adapters
/// merge caller-supplied extras first and then `insert` their own named
/// arguments, so named arguments always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any existing values for the key
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append a parameter value, keeping existing values (list semantics)
    pub fn push(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// Set a parameter only when a value is present
    pub fn opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Replace any existing values for the key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.entries.retain(|(k, _)| k != &key);
        self.entries.push((key, value.into()));
    }

    /// Append a value in place, keeping existing values
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Merge another parameter map, appending its entries
    pub fn extend(&mut self, other: Params) {
        self.entries.extend(other.entries);
    }

    /// First value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a key
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the pairs for serialization
    pub fn pairs(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// File attachment for multipart uploads
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name
    pub field_name: String,
    /// File name
    pub file_name: String,
    /// File content
    pub content: Bytes,
    /// MIME type
    pub mime_type: String,
}

impl FileUpload {
    /// Create a new file upload, sniffing the MIME type from the file name
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let file_name_str = file_name.into();
        let mime_type = mime_guess::from_path(&file_name_str)
            .first_or_octet_stream()
            .to_string();

        Self {
            field_name: field_name.into(),
            file_name: file_name_str,
            content: content.into(),
            mime_type,
        }
    }

    /// Read a file from disk into an upload
    pub async fn from_path(
        field_name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> TwitterResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|e| TwitterError::Media {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());
        Ok(Self::new(field_name, file_name, content))
    }

    /// Override the sniffed MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// Outgoing request description, built fresh per call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Request parameters (query or form, depending on method)
    pub params: Params,
    /// File attachments (switches the request to multipart)
    pub files: Vec<FileUpload>,
}

impl ApiRequest {
    /// Create a new request description
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            params: Params::new(),
            files: Vec::new(),
        }
    }

    /// Set the parameters
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set the file attachments
    pub fn files(mut self, files: Vec<FileUpload>) -> Self {
        self.files = files;
        self
    }

    /// Insert a header, used by authenticators to attach credentials
    pub fn header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }
}

/// Raw HTTP response: status code and body, uninterpreted
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body
    pub body: Bytes,
}

/// HTTP transport trait for dispatching API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw status and body
    ///
    /// Fails with [`TwitterError::Transport`] only when the call itself
    /// cannot complete; non-200 statuses are returned, not raised.
    async fn send(&self, request: ApiRequest) -> TwitterResult<HttpResponse>;
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> TwitterResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| TwitterError::transport(e.to_string()))?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    fn build_multipart(request: &ApiRequest) -> TwitterResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();

        for (name, value) in request.params.iter() {
            form = form.text(name.to_string(), value.to_string());
        }

        for file in &request.files {
            let part = reqwest::multipart::Part::bytes(file.content.to_vec())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| {
                    TwitterError::transport(format!(
                        "invalid MIME type {:?}: {e}",
                        file.mime_type
                    ))
                })?;
            form = form.part(file.field_name.clone(), part);
        }

        Ok(form)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> TwitterResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone())
            .timeout(self.default_timeout);

        if !request.files.is_empty() {
            builder = builder.multipart(Self::build_multipart(&request)?);
        } else if !request.params.is_empty() {
            builder = match request.method {
                Method::GET | Method::DELETE | Method::HEAD => {
                    builder.query(request.params.pairs())
                }
                _ => builder.form(request.params.pairs()),
            };
        }

        let response = builder.send().await.map_err(TwitterError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(TwitterError::from)?;

        debug!(status = %status, body_len = body.len(), "Received response");

        Ok(HttpResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}
