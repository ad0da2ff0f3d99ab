use async_trait::async_trait;

use crate::error::FetchError;

/// Raw attachment bytes as returned by the file service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FetchedFile {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}

/// Retrieves an attachment by its source-platform file id
///
/// Implementations own transport, authentication and timeout policy. Any
/// non-success answer must surface as an error; callers never receive a
/// placeholder.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, file_id: &str) -> Result<FetchedFile, FetchError>;
}
