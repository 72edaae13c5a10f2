//! Twitter client implementation.
//!
//! Provides the main entry point: a [`TwitterClient`] owns the request
//! pipeline and one instance of each endpoint service. Authenticator,
//! parser, and transport are injected at construction time and fixed for
//! the client's lifetime.

use crate::auth::Authenticator;
use crate::config::TwitterConfig;
use crate::errors::TwitterResult;
use crate::parser::{JsonParser, Parser};
use crate::request::{RequestPipeline, ResponseValue};
use crate::services::{StatusesService, TimelinesService};
use crate::transport::{FileUpload, HttpTransport, Params, ReqwestTransport};
use http::Method;
use std::sync::Arc;

/// Main Twitter client
#[derive(Debug, Clone)]
pub struct TwitterClient {
    pipeline: Arc<RequestPipeline>,
    timelines: TimelinesService,
    statuses: StatusesService,
}

impl TwitterClient {
    /// Create a client with the given configuration, the default JSON
    /// parser, and no authentication
    pub fn new(config: TwitterConfig) -> TwitterResult<Self> {
        Self::builder().config(config).build()
    }

    /// Create a new client builder
    pub fn builder() -> TwitterClientBuilder {
        TwitterClientBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &TwitterConfig {
        self.pipeline.config()
    }

    /// Get the timelines service
    pub fn timelines(&self) -> &TimelinesService {
        &self.timelines
    }

    /// Get the statuses service
    pub fn statuses(&self) -> &StatusesService {
        &self.statuses
    }

    /// Send a request to an endpoint not covered by the service catalog
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> TwitterResult<ResponseValue> {
        self.pipeline.request(method, path, params).await
    }

    /// Send a request with file attachments and an explicit subdomain
    pub async fn request_with(
        &self,
        method: Method,
        path: &str,
        params: Params,
        files: Vec<FileUpload>,
        subdomain: &str,
    ) -> TwitterResult<ResponseValue> {
        self.pipeline
            .request_with(method, path, params, files, subdomain)
            .await
    }
}

/// Builder for [`TwitterClient`]
pub struct TwitterClientBuilder {
    config: TwitterConfig,
    authenticator: Option<Arc<dyn Authenticator>>,
    parser: Option<Arc<dyn Parser>>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl TwitterClientBuilder {
    /// Create a new builder with default configuration and the JSON parser
    pub fn new() -> Self {
        Self {
            config: TwitterConfig::default(),
            authenticator: None,
            parser: Some(Arc::new(JsonParser::new())),
            transport: None,
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: TwitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the authenticator
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Replace the default JSON parser
    pub fn parser(mut self, parser: impl Parser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Remove the parser; responses come back as raw bytes
    pub fn without_parser(mut self) -> Self {
        self.parser = None;
        self
    }

    /// Replace the default HTTP transport (used by tests)
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// Fails with [`crate::TwitterError::Configuration`] when the
    /// configuration is invalid or the parser does not support the
    /// configured response format.
    pub fn build(self) -> TwitterResult<TwitterClient> {
        self.config.validate()?;
        let config = Arc::new(self.config);

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.timeout)?),
        };

        let pipeline = Arc::new(RequestPipeline::new(
            config,
            self.authenticator,
            self.parser,
            transport,
        )?);

        Ok(TwitterClient {
            timelines: TimelinesService::new(pipeline.clone()),
            statuses: StatusesService::new(pipeline.clone()),
            pipeline,
        })
    }
}

impl Default for TwitterClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TwitterClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClientBuilder")
            .field("config", &self.config)
            .field("authenticated", &self.authenticator.is_some())
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}
