// Hand-crafted async HTTP client for the JumpCloud v2 API.
//
// Base path: https://console.jumpcloud.com/api/v2/
// Auth: x-api-key header

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types;

/// Production API root. Endpoint paths are joined onto it.
pub const DEFAULT_BASE_URL: &str = "https://console.jumpcloud.com/api/";

const API_VERSION: &str = "v2";

/// Everything needed to build a [`JumpCloudClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Config pointing at the production API.
    pub fn new(api_key: SecretString, transport: TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            api_key,
            transport,
        })
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the JumpCloud v2 API.
///
/// Each public method issues exactly one request. Non-success statuses and
/// undecodable bodies are returned as errors; nothing is retried.
#[derive(Debug, Clone)]
pub struct JumpCloudClient {
    http: reqwest::Client,
    base_url: Url,
}

impl JumpCloudClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a [`ClientConfig`], installing the auth and content headers.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client(&config.api_key)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(config.base_url.clone()),
        })
    }

    /// Ensure the base path ends with `/` so relative joins keep it.
    fn normalize_base_url(mut url: Url) -> Url {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint (e.g. `"usergroups/abc"`) onto `{base}/v2/`.
    fn url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("{API_VERSION}/{endpoint}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let body = self.send(Method::GET, endpoint, None).await?;
        decode(&body)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        let payload = serde_json::to_vec(body)?;
        let body = self.send(Method::POST, endpoint, Some(payload)).await?;
        decode(&body)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        let payload = serde_json::to_vec(body)?;
        let body = self.send(Method::PUT, endpoint, Some(payload)).await?;
        decode(&body)
    }

    async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        self.send(Method::DELETE, endpoint, None).await.map(|_| ())
    }

    // ── Request / response handling ──────────────────────────────────

    /// Send one request and buffer the response body.
    ///
    /// The body is read exactly once into memory, so it can be logged and
    /// then decoded (or attached to an error) from the same buffer.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<Bytes, Error> {
        let url = self.url(endpoint)?;
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(payload) = payload {
            trace!(%method, %url, body = %String::from_utf8_lossy(&payload), "request body");
            request = request.body(payload);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        trace!(
            %method,
            %url,
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "got response from API"
        );

        check_status(status, &body)?;
        Ok(body)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── User groups ──────────────────────────────────────────────────

    pub async fn create_user_group(
        &self,
        group: &types::UserGroup,
    ) -> Result<types::UserGroup, Error> {
        debug!(name = %group.name, "creating user group");
        self.post("usergroups", group).await
    }

    pub async fn get_user_group(&self, id: &str) -> Result<types::UserGroup, Error> {
        self.get(&format!("usergroups/{id}")).await
    }

    /// Full-body replace. Every updatable attribute in `group` is written.
    pub async fn update_user_group(
        &self,
        group: &types::UserGroup,
    ) -> Result<types::UserGroup, Error> {
        debug!(id = %group.id, name = %group.name, "updating user group");
        self.put(&format!("usergroups/{}", group.id), group).await
    }

    pub async fn delete_user_group(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("usergroups/{id}")).await
    }

    // ── Active Directory ─────────────────────────────────────────────

    pub async fn create_active_directory(
        &self,
        input: &types::ActiveDirectoryInput,
    ) -> Result<types::ActiveDirectory, Error> {
        self.post("activedirectories", input).await
    }

    pub async fn get_active_directory(&self, id: &str) -> Result<types::ActiveDirectory, Error> {
        self.get(&format!("activedirectories/{id}")).await
    }

    pub async fn delete_active_directory(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("activedirectories/{id}")).await
    }

    // ── System groups ────────────────────────────────────────────────

    pub async fn create_system_group(
        &self,
        input: &types::SystemGroupInput,
    ) -> Result<types::SystemGroup, Error> {
        self.post("systemgroups", input).await
    }

    pub async fn get_system_group(&self, id: &str) -> Result<types::SystemGroup, Error> {
        self.get(&format!("systemgroups/{id}")).await
    }

    pub async fn update_system_group(
        &self,
        id: &str,
        input: &types::SystemGroupInput,
    ) -> Result<types::SystemGroup, Error> {
        self.put(&format!("systemgroups/{id}"), input).await
    }

    pub async fn delete_system_group(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("systemgroups/{id}")).await
    }
}

/// Any status >= 300 is terminal and carries the raw body.
fn check_status(status: StatusCode, body: &[u8]) -> Result<(), Error> {
    if status.as_u16() >= 300 {
        return Err(Error::Api {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body).into_owned();
        let preview: String = text.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: text,
        }
    })
}
