// Transport configuration for building the reqwest::Client.
//
// Owns timeout and User-Agent, and installs the default headers every
// JumpCloud request carries (API key, Accept, Content-Type).

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Media type for both request and response bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Registry address used to build the User-Agent.
const USER_AGENT_PREFIX: &str = "registry.terraform.io/techjavelin/jumpcloud";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: user_agent(env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build the User-Agent string identifying the provider and its version.
pub fn user_agent(provider_version: &str) -> String {
    format!("{USER_AGENT_PREFIX}@V{provider_version}")
}

impl TransportConfig {
    /// Config identifying the given provider version.
    pub fn for_version(provider_version: &str) -> Self {
        Self {
            user_agent: user_agent(provider_version),
            ..Self::default()
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` that injects the JumpCloud headers on every request.
    pub fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();

        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidApiKey {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert("x-api-key", key_value);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
