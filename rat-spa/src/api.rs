//! Backend data client.
//!
//! Views depend on the `DataSource` capability rather than on `ApiClient`, so
//! the Home view can be driven by a fake in tests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use snafu::prelude::*;
use tracing::{debug, info, warn};

#[derive(Debug, Snafu)]
pub enum FetchError {
    #[snafu(display("Failed to initialise HTTP client: {source}"))]
    Client { source: reqwest::Error },

    #[snafu(display("Request to {url} failed: {source}"))]
    Request { url: String, source: reqwest::Error },

    #[snafu(display("Backend responded with HTTP {status}"))]
    Status { status: StatusCode, body: String },

    #[snafu(display("Backend returned malformed JSON: {source}"))]
    Decode { source: serde_json::Error },
}

/// Something that can produce the backend payload.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    /// Perform one fetch. Each call is independent: no retry, no caching.
    async fn fetch_data(&self) -> Result<Value, FetchError>;
}

/// HTTP client for the single backend endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder().build().context(ClientSnafu)?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch_data(&self) -> Result<Value, FetchError> {
        debug!(url = %self.url, "fetching backend data");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .context(RequestSnafu { url: &self.url })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %self.url, %status, "backend returned an error status");
            return StatusSnafu { status, body }.fail();
        }

        let bytes = response
            .bytes()
            .await
            .context(RequestSnafu { url: &self.url })?;
        let value = serde_json::from_slice(&bytes).context(DecodeSnafu)?;
        info!(url = %self.url, %status, "backend data received");
        Ok(value)
    }
}
