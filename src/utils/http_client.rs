use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::utils::url::UrlUtils;
use crate::utils::DecompressionService;

/// HTTP client that transparently decompresses playlist payloads
#[derive(Debug, Clone)]
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with only connection timeout (no total request timeout)
    pub fn with_connection_timeout(connect_timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::request("-", format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch URL and return decompressed text content
    pub async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        debug!("Fetching text content from: {}", safe_url);

        let response = self.client.get(url).send().await.map_err(|e| {
            SourceError::request(&safe_url, UrlUtils::obfuscate_credentials(&e.to_string()))
        })?;

        let bytes = Self::process_response_to_bytes(response, &safe_url).await?;
        let content = DecompressionService::decode_text(&bytes)?;

        debug!("Successfully fetched {} characters of text content", content.len());
        Ok(content)
    }

    async fn process_response_to_bytes(response: Response, safe_url: &str) -> SourceResult<Vec<u8>> {
        if !response.status().is_success() {
            return Err(SourceError::Http {
                status: response.status().as_u16(),
                url: safe_url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::request(safe_url, format!("failed to read response: {e}")))?;

        debug!(
            "Fetched {} bytes of raw content (compression: {:?})",
            bytes.len(),
            DecompressionService::detect_compression_format(&bytes)
        );

        Ok(bytes.to_vec())
    }
}
