//! Transport seam between the request pipeline and the network.
//!
//! The pipeline hands a fully signed flat parameter set to a [`Transport`]
//! and never retries on its own; retry policy, timeouts and proxies belong
//! to the transport implementation.  Tests inject a stub transport to
//! capture the exact payload.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Production base URL of the gateway.
pub const DEFAULT_BASE_URL: &str = "https://pay.fondy.eu";

/// Errors produced while delivering a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Delivery contract used by [`CheckoutClient`](super::CheckoutClient).
///
/// `post` is called exactly once per operation, after signing, with the
/// complete wire parameter set (signature included).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        path: &str,
        params: &BTreeMap<&'static str, String>,
    ) -> Result<serde_json::Value, TransportError>;
}

/// `reqwest`-backed transport speaking the gateway's JSON protocol.
///
/// Wraps the flat parameter set in the `{"request": {...}}` envelope and
/// posts it to `{base_url}{path}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport against a custom base URL (e.g. a sandbox).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Create a transport against the production gateway.
    pub fn production() -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(DEFAULT_BASE_URL)?))
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        params: &BTreeMap<&'static str, String>,
    ) -> Result<serde_json::Value, TransportError> {
        let url = self.base_url.join(path)?;
        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "request": params }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }
        Ok(resp.json().await?)
    }
}
