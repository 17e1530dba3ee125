//! Transport seam between the typed services and the wire.
//!
//! [`ChefClient`](crate::ChefClient) never talks to reqwest directly; it hands
//! every request to a [`Transport`]. The default [`HttpTransport`] sends plain
//! JSON over HTTP. Deployments that need request signing supply their own
//! implementation and wrap it with [`ChefClient::with_transport`](crate::ChefClient::with_transport).

use crate::error::{ChefApiError, Result};
use crate::types::ChefConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use tracing::debug;

/// Raw response handed back by a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Absolute URL the request went to
    pub url: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Dispatches a single request against the server API root.
///
/// `path` is relative to the API root and already escaped (e.g. `users/alice`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>)
        -> Result<ApiResponse>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the server described by `config`.
    pub fn new(config: &ChefConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ChefApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ChefApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ChefApiError::InvalidUrl(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-chef-version",
            HeaderValue::from_str(&config.chef_version)
                .map_err(|e| ChefApiError::InvalidConfig(format!("bad chef version: {}", e)))?,
        );
        if let Some(client_name) = &config.client_name {
            headers.insert(
                "x-ops-userid",
                HeaderValue::from_str(client_name)
                    .map_err(|e| ChefApiError::InvalidConfig(format!("bad client name: {}", e)))?,
            );
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("chef-api/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(method = %method, url = %url, has_body = body.is_some(), "Sending request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ChefApiError::ServerUnreachable(e.to_string())
            } else {
                ChefApiError::Request(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse { url, status, body })
    }
}
