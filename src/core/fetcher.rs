use crate::core::PageSource;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Plain GET of one URL. No retries; a failed fetch just fails the cycle.
pub struct HttpPageSource {
    url: String,
    client: Client,
}

impl HttpPageSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Fetching page: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Page response status: {}", status);
        if !status.is_success() {
            return Err(WatchError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes", body.len());
        Ok(body)
    }
}
