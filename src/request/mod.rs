//! The generic request pipeline.
//!
//! Every endpoint method funnels into [`RequestPipeline::request_with`]:
//! build the absolute URL from the host template, let the authenticator
//! attach credentials, dispatch through the transport, interpret the status
//! code, and route the body through the parser. No retries, no caching, no
//! per-call mutable state.

use crate::auth::Authenticator;
use crate::config::TwitterConfig;
use crate::errors::{TwitterError, TwitterResult};
use crate::parser::{Parser, GENERIC_ERROR_MESSAGE};
use crate::transport::{ApiRequest, FileUpload, HttpTransport, Params};
use bytes::Bytes;
use http::{Method, StatusCode};
use std::sync::Arc;
use tracing::instrument;

/// Outcome of a successful request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    /// Structured value produced by the configured parser
    Parsed(serde_json::Value),
    /// Raw body bytes, returned unchanged when the body is empty or no
    /// parser is configured
    Raw(Bytes),
}

impl ResponseValue {
    /// Borrow the parsed value, if any
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Consume into the parsed value, if any
    pub fn into_value(self) -> Option<serde_json::Value> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Borrow the raw bytes, if any
    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            Self::Parsed(_) => None,
        }
    }
}

/// The request pipeline shared by all endpoint methods
///
/// Holds the immutable client configuration together with the pluggable
/// authenticator, parser, and transport. Safe for concurrent use: every
/// field is shared immutably.
pub struct RequestPipeline {
    config: Arc<TwitterConfig>,
    authenticator: Option<Arc<dyn Authenticator>>,
    parser: Option<Arc<dyn Parser>>,
    transport: Arc<dyn HttpTransport>,
}

impl RequestPipeline {
    /// Create a new pipeline
    ///
    /// Fails with [`TwitterError::Configuration`] when a parser is present
    /// but does not support the configured response format.
    pub fn new(
        config: Arc<TwitterConfig>,
        authenticator: Option<Arc<dyn Authenticator>>,
        parser: Option<Arc<dyn Parser>>,
        transport: Arc<dyn HttpTransport>,
    ) -> TwitterResult<Self> {
        if let Some(parser) = &parser {
            if !parser.supports_format(&config.response_format) {
                return Err(TwitterError::configuration(format!(
                    "parser does not support response format: {}",
                    config.response_format
                )));
            }
        }

        Ok(Self {
            config,
            authenticator,
            parser,
            transport,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &TwitterConfig {
        &self.config
    }

    /// Send a request to the default `api` subdomain with no attachments
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> TwitterResult<ResponseValue> {
        self.request_with(method, path, params, Vec::new(), crate::DEFAULT_SUBDOMAIN)
            .await
    }

    /// Send a request with file attachments and an explicit subdomain
    #[instrument(skip(self, params, files), fields(method = %method))]
    pub async fn request_with(
        &self,
        method: Method,
        path: &str,
        params: Params,
        files: Vec<FileUpload>,
        subdomain: &str,
    ) -> TwitterResult<ResponseValue> {
        let url = self.config.build_url(subdomain, path)?;

        let mut request = ApiRequest::new(method, url).params(params).files(files);
        request.headers = self.config.default_headers.clone();

        if let Some(auth) = &self.authenticator {
            auth.authenticate(&mut request)?;
        }

        let response = self.transport.send(request).await?;

        // Exactly 200 counts as success; every other code is an API failure,
        // with the message pulled out of the body best-effort.
        if response.status != StatusCode::OK {
            let message = match &self.parser {
                Some(parser) => parser.parse_error(&response.body),
                None => GENERIC_ERROR_MESSAGE.to_string(),
            };
            return Err(TwitterError::Api {
                status: response.status.as_u16(),
                message,
            });
        }

        match &self.parser {
            Some(parser) if !response.body.is_empty() => {
                Ok(ResponseValue::Parsed(parser.parse_content(&response.body)?))
            }
            _ => Ok(ResponseValue::Raw(response.body)),
        }
    }
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("config", &self.config)
            .field("authenticated", &self.authenticator.is_some())
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenAuth;
    use crate::config::{TwitterConfig, TwitterConfigBuilder};
    use crate::mocks::MockTransport;
    use crate::parser::JsonParser;
    use http::header::AUTHORIZATION;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn pipeline_with(transport: Arc<MockTransport>) -> RequestPipeline {
        RequestPipeline::new(
            Arc::new(TwitterConfig::default()),
            None,
            Some(Arc::new(JsonParser::new())),
            transport,
        )
        .unwrap()
    }

    #[test]
    fn test_construction_rejects_unsupported_format() {
        let config = TwitterConfigBuilder::new()
            .response_format("xml")
            .build_unchecked();
        let result = RequestPipeline::new(
            Arc::new(config),
            None,
            Some(Arc::new(JsonParser::new())),
            Arc::new(MockTransport::new()),
        );

        let err = result.err().unwrap();
        assert!(matches!(err, TwitterError::Configuration { .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error: parser does not support response format: xml"
        );
    }

    #[test]
    fn test_construction_without_parser_skips_format_check() {
        let config = TwitterConfigBuilder::new()
            .response_format("xml")
            .build_unchecked();
        let result = RequestPipeline::new(
            Arc::new(config),
            None,
            None,
            Arc::new(MockTransport::new()),
        );
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_url_follows_template() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, "{}");
        let pipeline = pipeline_with(transport.clone());

        pipeline
            .request(Method::GET, "statuses/home_timeline", Params::new())
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url,
            "https://api.twitter.com/1/statuses/home_timeline.json"
        );
        assert_eq!(request.method, Method::GET);
    }

    #[tokio::test]
    async fn test_subdomain_override() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, "{}");
        let pipeline = pipeline_with(transport.clone());

        pipeline
            .request_with(
                Method::POST,
                "statuses/update_with_media",
                Params::new(),
                Vec::new(),
                "upload",
            )
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().unwrap().url,
            "https://upload.twitter.com/1/statuses/update_with_media.json"
        );
    }

    #[tokio::test]
    async fn test_authenticator_attaches_credentials() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, "{}");
        let pipeline = RequestPipeline::new(
            Arc::new(TwitterConfig::default()),
            Some(Arc::new(TokenAuth::new("secret"))),
            Some(Arc::new(JsonParser::new())),
            transport.clone(),
        )
        .unwrap();

        pipeline
            .request(Method::GET, "statuses/mentions", Params::new())
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer secret"
        );
    }

    #[test_case(400)]
    #[test_case(401)]
    #[test_case(404)]
    #[test_case(500)]
    #[tokio::test]
    async fn test_non_200_yields_api_error(status: u16) {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(status, r#"{"error":"Something went wrong"}"#);
        let pipeline = pipeline_with(transport);

        let err = pipeline
            .request(Method::GET, "statuses/public_timeline", Params::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(status));
        assert_eq!(err.to_string(), "API error: Something went wrong");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = Arc::new(MockTransport::new());
        transport.fail_with("dns failure");
        let pipeline = pipeline_with(transport);

        let err = pipeline
            .request(Method::GET, "statuses/mentions", Params::new())
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Request error: dns failure");
    }

    #[tokio::test]
    async fn test_empty_body_returns_raw_bytes() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, "");
        let pipeline = pipeline_with(transport);

        let value = pipeline
            .request(Method::POST, "statuses/destroy/1", Params::new())
            .await
            .unwrap();

        assert_eq!(value, ResponseValue::Raw(Bytes::new()));
    }

    #[tokio::test]
    async fn test_parsed_body_matches_direct_parser_output() {
        let body = r#"{"id":1,"text":"hello world"}"#;
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, body);
        let pipeline = pipeline_with(transport);

        let value = pipeline
            .request(Method::GET, "statuses/show/1", Params::new())
            .await
            .unwrap();

        let direct = JsonParser::new().parse_content(body.as_bytes()).unwrap();
        assert_eq!(value, ResponseValue::Parsed(direct));
        assert_eq!(
            value.into_value().unwrap(),
            json!({"id": 1, "text": "hello world"})
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body_yields_parse_error() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, "{broken");
        let pipeline = pipeline_with(transport);

        let err = pipeline
            .request(Method::GET, "statuses/show/1", Params::new())
            .await
            .unwrap_err();

        assert!(err.is_parse());
    }

    #[tokio::test]
    async fn test_no_parser_returns_raw_bytes() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(200, r#"{"id":1}"#);
        let pipeline = RequestPipeline::new(
            Arc::new(TwitterConfig::default()),
            None,
            None,
            transport,
        )
        .unwrap();

        let value = pipeline
            .request(Method::GET, "statuses/show/1", Params::new())
            .await
            .unwrap();

        assert_eq!(value, ResponseValue::Raw(Bytes::from_static(br#"{"id":1}"#)));
    }

    #[tokio::test]
    async fn test_no_parser_error_message_is_generic() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_with(500, "whatever");
        let pipeline = RequestPipeline::new(
            Arc::new(TwitterConfig::default()),
            None,
            None,
            transport,
        )
        .unwrap();

        let err = pipeline
            .request(Method::GET, "statuses/show/1", Params::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), format!("API error: {GENERIC_ERROR_MESSAGE}"));
    }
}
