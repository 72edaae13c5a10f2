//! Configuration management for the Twitter client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern

use crate::errors::{TwitterError, TwitterResult};
use http::HeaderMap;
use std::time::Duration;
use url::Url;

/// Configuration for the Twitter client
///
/// Immutable after construction; a client holds one configuration for its
/// whole lifetime.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// Hostname of the API server, without a subdomain prefix
    pub host: String,
    /// Use HTTPS when true, plain HTTP otherwise
    pub secure: bool,
    /// API version segment of the URL
    pub api_version: String,
    /// Response format requested from the server (URL suffix)
    pub response_format: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers attached to every request
    pub default_headers: HeaderMap,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            secure: true,
            api_version: crate::DEFAULT_API_VERSION.to_string(),
            response_format: crate::DEFAULT_RESPONSE_FORMAT.to_string(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }
}

impl TwitterConfig {
    /// Create a new configuration builder
    pub fn builder() -> TwitterConfigBuilder {
        TwitterConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `TWITTER_HOST` - API hostname (default "twitter.com")
    /// - `TWITTER_SECURE` - "false" to disable HTTPS
    /// - `TWITTER_API_VERSION` - API version segment (default "1")
    /// - `TWITTER_RESPONSE_FORMAT` - response format suffix (default "json")
    /// - `TWITTER_TIMEOUT` - request timeout in seconds
    pub fn from_env() -> TwitterResult<Self> {
        let mut builder = TwitterConfigBuilder::new();

        if let Ok(host) = std::env::var("TWITTER_HOST") {
            builder = builder.host(&host);
        }

        if let Ok(secure) = std::env::var("TWITTER_SECURE") {
            builder = builder.secure(secure != "false");
        }

        if let Ok(version) = std::env::var("TWITTER_API_VERSION") {
            builder = builder.api_version(&version);
        }

        if let Ok(format) = std::env::var("TWITTER_RESPONSE_FORMAT") {
            builder = builder.response_format(&format);
        }

        if let Ok(timeout) = std::env::var("TWITTER_TIMEOUT") {
            let secs = timeout.parse::<u64>().map_err(|e| {
                TwitterError::configuration(format!(
                    "invalid TWITTER_TIMEOUT {timeout:?}: {e}"
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// URL scheme selected by the secure flag
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Base URL for the given subdomain:
    /// `scheme://{subdomain}.{host}/{api_version}/`
    pub fn base_url(&self, subdomain: &str) -> String {
        format!(
            "{}://{}.{}/{}/",
            self.scheme(),
            subdomain,
            self.host,
            self.api_version
        )
    }

    /// Absolute URL for an endpoint path, with the response format appended
    /// as a suffix
    ///
    /// The relative path is joined onto the base with standard URL-join
    /// semantics; consecutive separators are not collapsed.
    pub fn build_url(&self, subdomain: &str, path: &str) -> TwitterResult<String> {
        let base = Url::parse(&self.base_url(subdomain)).map_err(|e| {
            TwitterError::configuration(format!("invalid base URL: {e}"))
        })?;
        let joined = base.join(path).map_err(|e| {
            TwitterError::configuration(format!("invalid endpoint path {path:?}: {e}"))
        })?;
        Ok(format!("{}.{}", joined, self.response_format))
    }

    /// Validate the configuration
    pub fn validate(&self) -> TwitterResult<()> {
        if self.host.is_empty() {
            return Err(TwitterError::configuration("host must not be empty"));
        }

        // The template must yield a parseable URL for the default subdomain.
        Url::parse(&self.base_url(crate::DEFAULT_SUBDOMAIN)).map_err(|e| {
            TwitterError::configuration(format!("invalid host {:?}: {e}", self.host))
        })?;

        Ok(())
    }
}

/// Builder for TwitterConfig
#[derive(Debug, Default)]
pub struct TwitterConfigBuilder {
    config: TwitterConfig,
}

impl TwitterConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: TwitterConfig::default(),
        }
    }

    /// Set the API hostname
    pub fn host(mut self, host: &str) -> Self {
        self.config.host = host.to_string();
        self
    }

    /// Use HTTPS (true, default) or plain HTTP (false)
    pub fn secure(mut self, secure: bool) -> Self {
        self.config.secure = secure;
        self
    }

    /// Set the API version segment
    pub fn api_version(mut self, version: &str) -> Self {
        self.config.api_version = version.to_string();
        self
    }

    /// Set the response format suffix
    pub fn response_format(mut self, format: &str) -> Self {
        self.config.response_format = format.to_string();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn default_header(mut self, name: &str, value: &str) -> TwitterResult<Self> {
        let header_name = name.parse::<http::header::HeaderName>().map_err(|_| {
            TwitterError::configuration(format!("invalid header name {name:?}"))
        })?;
        let header_value = value.parse::<http::header::HeaderValue>().map_err(|_| {
            TwitterError::configuration(format!("invalid value for header {name:?}"))
        })?;
        self.config.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> TwitterResult<TwitterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> TwitterConfig {
        self.config
    }
}
