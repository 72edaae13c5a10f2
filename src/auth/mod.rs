//! Authentication for the Twitter client.
//!
//! An [`Authenticator`] attaches credentials to an outgoing request
//! description. It is a pure transformation: no network I/O, no state.
//! The pipeline never depends on a concrete mechanism.

use crate::errors::{TwitterError, TwitterResult};
use crate::transport::ApiRequest;
use base64::Engine as _;
use http::header::{HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

/// Attaches credentials to an outgoing request description
pub trait Authenticator: Send + Sync {
    /// Attach credentials to the request, typically as headers
    fn authenticate(&self, request: &mut ApiRequest) -> TwitterResult<()>;
}

/// Bearer-token authentication
#[derive(Clone)]
pub struct TokenAuth {
    token: SecretString,
}

impl TokenAuth {
    /// Create a new token authenticator
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    /// Create a token authenticator from the `TWITTER_ACCESS_TOKEN`
    /// environment variable
    pub fn from_env() -> TwitterResult<Self> {
        let token = std::env::var("TWITTER_ACCESS_TOKEN").map_err(|_| {
            TwitterError::configuration("TWITTER_ACCESS_TOKEN is not set")
        })?;
        Ok(Self::new(token))
    }
}

impl Authenticator for TokenAuth {
    fn authenticate(&self, request: &mut ApiRequest) -> TwitterResult<()> {
        let value = format!("Bearer {}", self.token.expose_secret());
        let header = HeaderValue::from_str(&value)
            .map_err(|_| TwitterError::configuration("token contains invalid header characters"))?;
        request.header(AUTHORIZATION, header);
        Ok(())
    }
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenAuth([REDACTED])")
    }
}

/// HTTP basic authentication (RFC 7617)
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: SecretString,
}

impl BasicAuth {
    /// Create a new basic authenticator
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Get the username
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Authenticator for BasicAuth {
    fn authenticate(&self, request: &mut ApiRequest) -> TwitterResult<()> {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        let header = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|_| {
            TwitterError::configuration("credentials contain invalid header characters")
        })?;
        request.header(AUTHORIZATION, header);
        Ok(())
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
