use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use snafu::ResultExt;
use url::Url;

use crate::providers::{
    ClientBuildSnafu, ProviderError, ProviderInitError, RawResponse, Transport,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context(ClientBuildSnafu)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, ProviderError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ProviderError::transport)?;
        Ok(RawResponse { status, body })
    }
}
