// HTTP file-service client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::traits::{FetchedFile, FileFetcher};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Downloads attachments with `GET {base_url}/{file_id}`
///
/// Timeouts come from [`FetchConfig`]; failed requests are never retried here.
#[derive(Debug, Clone)]
pub struct HttpFileFetcher {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpFileFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| FetchError::Config("Invalid access token format".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::Config(format!("Invalid base_url {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Config(format!(
                "base_url {} cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build the download URL, escaping the id as a single path segment
    fn file_url(&self, file_id: &str) -> Result<Url, FetchError> {
        if file_id.trim().is_empty() {
            return Err(FetchError::InvalidFileId(file_id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Config(format!("base_url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(file_id);
        Ok(url)
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch(&self, file_id: &str) -> Result<FetchedFile, FetchError> {
        let url = self.file_url(file_id)?;
        tracing::debug!(file_id, url = %url, "Fetching remote file");

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(file_id, error = %e, "Could not read rejection body");
                    String::new()
                }
            };
            tracing::warn!(file_id, status = %status, "File service rejected download");
            return Err(FetchError::Status {
                file_id: file_id.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let bytes = response.bytes().await?;
        tracing::debug!(file_id, size = bytes.len(), content_type = %content_type, "Remote file fetched");

        Ok(FetchedFile {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
