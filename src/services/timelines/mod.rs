//! Timeline endpoints.
//!
//! All timeline methods are GET requests under `statuses/`; each one merges
//! caller-supplied extras into a parameter mapping and delegates to the
//! pipeline. Paging and filtering knobs (`count`, `page`, `since_id`, ...)
//! travel as plain parameters.

use crate::errors::TwitterResult;
use crate::request::{RequestPipeline, ResponseValue};
use crate::transport::Params;
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;
use tracing::instrument;

/// Request for a user-scoped timeline
///
/// Without a `screen_name` or `user_id` the authenticating user's timeline
/// is returned.
#[derive(Debug, Clone, Default)]
pub struct UserTimelineRequest {
    screen_name: Option<String>,
    user_id: Option<u64>,
    extra: Params,
}

impl UserTimelineRequest {
    /// Create a request for the authenticating user's timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a user by screen name
    pub fn screen_name(mut self, screen_name: impl Into<String>) -> Self {
        self.screen_name = Some(screen_name.into());
        self
    }

    /// Target a user by numeric ID
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Add an arbitrary API parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra = self.extra.push(key, value);
        self
    }

    fn into_params(self) -> Params {
        let mut params = self.extra;
        // Named arguments win over caller-supplied extras.
        if let Some(screen_name) = self.screen_name {
            params.insert("screen_name", screen_name);
        }
        if let Some(user_id) = self.user_id {
            params.insert("user_id", user_id.to_string());
        }
        params
    }
}

/// Request naming a user by ID-or-screen-name, for the retweet-by-user
/// timelines
#[derive(Debug, Clone, Default)]
pub struct UserRequest {
    id: Option<String>,
    screen_name: Option<String>,
    extra: Params,
}

impl UserRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a user by ID or screen name
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Target a user by screen name
    pub fn screen_name(mut self, screen_name: impl Into<String>) -> Self {
        self.screen_name = Some(screen_name.into());
        self
    }

    /// Add an arbitrary API parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra = self.extra.push(key, value);
        self
    }

    fn into_params(self) -> Params {
        let mut params = self.extra;
        if let Some(id) = self.id {
            params.insert("id", id);
        }
        if let Some(screen_name) = self.screen_name {
            params.insert("screen_name", screen_name);
        }
        params
    }
}

/// Trait for timeline operations
#[async_trait]
pub trait TimelinesServiceTrait: Send + Sync {
    /// Most recent statuses posted by the authenticating user and the users
    /// they follow
    async fn home_timeline(&self, params: Params) -> TwitterResult<ResponseValue>;

    /// Most recent mentions (statuses containing @username) for the
    /// authenticating user
    async fn mentions(&self, params: Params) -> TwitterResult<ResponseValue>;

    /// Most recent statuses from non-protected users
    async fn public_timeline(&self, params: Params) -> TwitterResult<ResponseValue>;

    /// Most recent retweets posted by the authenticating user
    async fn retweeted_by_me(&self, params: Params) -> TwitterResult<ResponseValue>;

    /// Most recent retweets posted by the users the authenticating user
    /// follows
    async fn retweeted_to_me(&self, params: Params) -> TwitterResult<ResponseValue>;

    /// Statuses of the authenticating user that others retweeted
    async fn retweets_of_me(&self, params: Params) -> TwitterResult<ResponseValue>;

    /// A user's timeline, the authenticating user's by default
    async fn user_timeline(&self, request: UserTimelineRequest)
        -> TwitterResult<ResponseValue>;

    /// Retweets posted by users the given user follows
    async fn retweeted_to_user(&self, request: UserRequest) -> TwitterResult<ResponseValue>;

    /// Retweets posted by the given user
    async fn retweeted_by_user(&self, request: UserRequest) -> TwitterResult<ResponseValue>;
}

/// Timeline service implementation
#[derive(Clone)]
pub struct TimelinesService {
    pipeline: Arc<RequestPipeline>,
}

impl TimelinesService {
    /// Create a new timelines service
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    async fn get(&self, path: &str, params: Params) -> TwitterResult<ResponseValue> {
        self.pipeline.request(Method::GET, path, params).await
    }
}

#[async_trait]
impl TimelinesServiceTrait for TimelinesService {
    #[instrument(skip(self, params))]
    async fn home_timeline(&self, params: Params) -> TwitterResult<ResponseValue> {
        self.get("statuses/home_timeline", params).await
    }

    #[instrument(skip(self, params))]
    async fn mentions(&self, params: Params) -> TwitterResult<ResponseValue> {
        self.get("statuses/mentions", params).await
    }

    #[instrument(skip(self, params))]
    async fn public_timeline(&self, params: Params) -> TwitterResult<ResponseValue> {
        self.get("statuses/public_timeline", params).await
    }

    #[instrument(skip(self, params))]
    async fn retweeted_by_me(&self, params: Params) -> TwitterResult<ResponseValue> {
        self.get("statuses/retweeted_by_me", params).await
    }

    #[instrument(skip(self, params))]
    async fn retweeted_to_me(&self, params: Params) -> TwitterResult<ResponseValue> {
        self.get("statuses/retweeted_to_me", params).await
    }

    #[instrument(skip(self, params))]
    async fn retweets_of_me(&self, params: Params) -> TwitterResult<ResponseValue> {
        self.get("statuses/retweets_of_me", params).await
    }

    #[instrument(skip(self, request))]
    async fn user_timeline(
        &self,
        request: UserTimelineRequest,
    ) -> TwitterResult<ResponseValue> {
        self.get("statuses/user_timeline", request.into_params()).await
    }

    #[instrument(skip(self, request))]
    async fn retweeted_to_user(&self, request: UserRequest) -> TwitterResult<ResponseValue> {
        self.get("statuses/retweeted_to_user", request.into_params()).await
    }

    #[instrument(skip(self, request))]
    async fn retweeted_by_user(&self, request: UserRequest) -> TwitterResult<ResponseValue> {
        self.get("statuses/retweeted_by_user", request.into_params()).await
    }
}

impl std::fmt::Debug for TimelinesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelinesService").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TwitterConfig;
    use crate::mocks::MockTransport;
    use crate::parser::JsonParser;
    use pretty_assertions::assert_eq;

    fn service() -> (TimelinesService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        transport.default_response(200, "[]");
        let pipeline = RequestPipeline::new(
            Arc::new(TwitterConfig::default()),
            None,
            Some(Arc::new(JsonParser::new())),
            transport.clone(),
        )
        .unwrap();
        (TimelinesService::new(Arc::new(pipeline)), transport)
    }

    #[tokio::test]
    async fn test_home_timeline_passes_params_through() {
        let (service, transport) = service();
        service
            .home_timeline(Params::new().set("count", "20"))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url,
            "https://api.twitter.com/1/statuses/home_timeline.json"
        );
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.params.get("count"), Some("20"));
    }

    #[tokio::test]
    async fn test_simple_timeline_paths() {
        let (service, transport) = service();

        service.mentions(Params::new()).await.unwrap();
        service.public_timeline(Params::new()).await.unwrap();
        service.retweeted_by_me(Params::new()).await.unwrap();
        service.retweeted_to_me(Params::new()).await.unwrap();
        service.retweets_of_me(Params::new()).await.unwrap();

        let urls: Vec<String> = transport.requests().iter().map(|r| r.url.clone()).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.twitter.com/1/statuses/mentions.json",
                "https://api.twitter.com/1/statuses/public_timeline.json",
                "https://api.twitter.com/1/statuses/retweeted_by_me.json",
                "https://api.twitter.com/1/statuses/retweeted_to_me.json",
                "https://api.twitter.com/1/statuses/retweets_of_me.json",
            ]
        );
    }

    #[tokio::test]
    async fn test_user_timeline_merges_identifiers() {
        let (service, transport) = service();
        service
            .user_timeline(
                UserTimelineRequest::new()
                    .screen_name("alice")
                    .param("count", "5"),
            )
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url,
            "https://api.twitter.com/1/statuses/user_timeline.json"
        );
        assert_eq!(request.params.get("screen_name"), Some("alice"));
        assert_eq!(request.params.get("count"), Some("5"));
        assert!(!request.params.contains("user_id"));
    }

    #[tokio::test]
    async fn test_named_arguments_override_extras() {
        let (service, transport) = service();
        service
            .user_timeline(
                UserTimelineRequest::new()
                    .param("screen_name", "mallory")
                    .screen_name("alice"),
            )
            .await
            .unwrap();

        let params = transport.last_request().unwrap().params;
        assert_eq!(params.get_all("screen_name"), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_retweeted_to_user_identifiers() {
        let (service, transport) = service();
        service
            .retweeted_to_user(UserRequest::new().id("12345"))
            .await
            .unwrap();
        service
            .retweeted_by_user(UserRequest::new().screen_name("bob"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].url,
            "https://api.twitter.com/1/statuses/retweeted_to_user.json"
        );
        assert_eq!(requests[0].params.get("id"), Some("12345"));
        assert_eq!(
            requests[1].url,
            "https://api.twitter.com/1/statuses/retweeted_by_user.json"
        );
        assert_eq!(requests[1].params.get("screen_name"), Some("bob"));
    }
}
