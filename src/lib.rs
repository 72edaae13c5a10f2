//! Twitter API Client
//!
//! Client for the Twitter REST API built around a single generic request
//! pipeline with pluggable authentication and response parsing:
//! - Endpoint services for timelines and statuses, including media upload
//! - Token and basic authentication, with secrets redacted from debug output
//! - Pluggable response parser (JSON by default) negotiated via the URL
//!   format suffix
//! - Tagged errors separating transport, API, configuration, and parse
//!   failures
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use twitter_client::auth::TokenAuth;
//! use twitter_client::services::{StatusesServiceTrait, UpdateStatusRequest};
//! use twitter_client::TwitterClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwitterClient::builder()
//!         .authenticator(TokenAuth::from_env()?)
//!         .build()?;
//!
//!     let status = client
//!         .statuses()
//!         .update(UpdateStatusRequest::new("hello world"))
//!         .await?;
//!
//!     println!("posted: {:?}", status.as_value());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod parser;
pub mod request;
pub mod transport;

// Services
pub mod services;

// Testing utilities
pub mod mocks;

// Re-exports for convenience
pub use client::{TwitterClient, TwitterClientBuilder};
pub use config::{TwitterConfig, TwitterConfigBuilder};
pub use errors::{TwitterError, TwitterResult};
pub use request::ResponseValue;
pub use transport::Params;

/// Default API hostname
pub const DEFAULT_HOST: &str = "twitter.com";

/// Default API version segment
pub const DEFAULT_API_VERSION: &str = "1";

/// Default response format suffix
pub const DEFAULT_RESPONSE_FORMAT: &str = "json";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Subdomain used for regular API calls
pub const DEFAULT_SUBDOMAIN: &str = "api";

/// Subdomain used for media upload endpoints
pub const UPLOAD_SUBDOMAIN: &str = "upload";

/// Create a Twitter client with the given configuration
pub fn create_client(config: TwitterConfig) -> TwitterResult<TwitterClient> {
    TwitterClient::new(config)
}

/// Create a Twitter client from environment variables
///
/// Reads the `TWITTER_*` configuration variables (see
/// [`TwitterConfig::from_env`]) and, when `TWITTER_ACCESS_TOKEN` is set,
/// attaches token authentication.
pub fn create_client_from_env() -> TwitterResult<TwitterClient> {
    let config = TwitterConfig::from_env()?;
    let mut builder = TwitterClient::builder().config(config);

    if std::env::var("TWITTER_ACCESS_TOKEN").is_ok() {
        builder = builder.authenticator(auth::TokenAuth::from_env()?);
    }

    builder.build()
}
