//! Mock implementations for testing.
//!
//! Provides a scripted transport that records every request description it
//! receives, so tests can verify URLs, methods, parameters, and attachments
//! without a network.

use crate::errors::{TwitterError, TwitterResult};
use crate::transport::{ApiRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Scripted reply for the mock transport
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return a response with the given status and body
    Response {
        /// HTTP status code
        status: u16,
        /// Response body
        body: Bytes,
    },
    /// Fail the call with a transport error
    TransportError(String),
}

/// Mock HTTP transport for testing
///
/// Replies are consumed in FIFO order; when the queue is empty the default
/// reply is used, and with no default the call fails with a transport error
/// so a missing script shows up immediately.
#[derive(Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    default_reply: Arc<Mutex<Option<MockReply>>>,
}

impl MockTransport {
    /// Create a new mock transport with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn respond_with(&self, status: u16, body: impl Into<Bytes>) {
        self.replies.lock().push_back(MockReply::Response {
            status,
            body: body.into(),
        });
    }

    /// Queue a 200 response with a JSON body
    pub fn respond_json(&self, value: &serde_json::Value) {
        self.respond_with(200, value.to_string());
    }

    /// Queue a transport failure
    pub fn fail_with(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .push_back(MockReply::TransportError(message.into()));
    }

    /// Set the reply used when the queue is empty
    pub fn default_response(&self, status: u16, body: impl Into<Bytes>) {
        *self.default_reply.lock() = Some(MockReply::Response {
            status,
            body: body.into(),
        });
    }

    /// All recorded request descriptions, in call order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Last recorded request description
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of calls dispatched through this transport
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> TwitterResult<HttpResponse> {
        self.requests.lock().push(request);

        let reply = self
            .replies
            .lock()
            .pop_front()
            .or_else(|| self.default_reply.lock().clone())
            .ok_or_else(|| TwitterError::transport("no mock response configured"))?;

        match reply {
            MockReply::Response { status, body } => Ok(HttpResponse {
                status: StatusCode::from_u16(status)
                    .map_err(|e| TwitterError::transport(e.to_string()))?,
                body,
            }),
            MockReply::TransportError(message) => Err(TwitterError::transport(message)),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued", &self.replies.lock().len())
            .field("recorded", &self.requests.lock().len())
            .finish()
    }
}
