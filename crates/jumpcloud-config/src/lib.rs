//! Provider settings for the JumpCloud Terraform provider.
//!
//! Layers compiled-in defaults under `JUMPCLOUD_*` environment variables,
//! resolves the API key (provider block first, environment second) and
//! translates the result into a `jumpcloud_api::ClientConfig`.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use jumpcloud_api::{ClientConfig, DEFAULT_BASE_URL, TransportConfig};

/// Environment variable consulted when the provider block leaves `api_key` unset.
pub const API_KEY_ENV: &str = "JUMPCLOUD_API_KEY";

const ENV_PREFIX: &str = "JUMPCLOUD_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error(
        "missing or empty JumpCloud API key: set api_key in the provider configuration \
         or the {} environment variable",
        API_KEY_ENV
    )]
    MissingApiKey,

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Provider settings gathered outside the Terraform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// API key from `JUMPCLOUD_API_KEY`.
    pub api_key: Option<String>,

    /// API root, overridable for testing against a mock server.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

/// The layered figment: defaults, then `JUMPCLOUD_*` environment variables.
pub fn figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load settings from defaults + environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings: Settings = figment().extract()?;
    debug!(
        base_url = %settings.api_base_url,
        timeout = settings.timeout,
        api_key_from_env = settings.api_key.is_some(),
        "loaded provider settings"
    );
    Ok(settings)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: the provider block wins, the environment is the fallback.
///
/// An explicitly configured empty string does not fall through to the
/// environment; it is reported as missing.
pub fn resolve_api_key(
    configured: Option<&str>,
    settings: &Settings,
) -> Result<SecretString, ConfigError> {
    let key = match configured {
        Some(key) => key,
        None => settings.api_key.as_deref().unwrap_or_default(),
    };

    if key.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }
    Ok(SecretString::from(key.to_owned()))
}

impl Settings {
    /// Build the API client config for the given key and provider version.
    pub fn client_config(
        &self,
        api_key: SecretString,
        provider_version: &str,
    ) -> Result<ClientConfig, ConfigError> {
        let base_url: url::Url =
            self.api_base_url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::Validation {
                    field: "api_base_url".into(),
                    reason: format!("invalid URL {}: {e}", self.api_base_url),
                })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }

        let transport = TransportConfig::for_version(provider_version)
            .with_timeout(Duration::from_secs(self.timeout));

        Ok(ClientConfig {
            base_url,
            api_key,
            transport,
        })
    }
}
