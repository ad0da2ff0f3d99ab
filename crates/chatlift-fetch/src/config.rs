// Configuration for the remote file service the importer downloads attachments from

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_timeout_ms() -> u64 {
    30_000
}

/// Connection settings for [`HttpFileFetcher`](crate::HttpFileFetcher)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Files are requested at `{base_url}/{file_id}`
    pub base_url: String,
    /// Bearer token sent with every request (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl FetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
