use thiserror::Error;

use chatlift_fetch::FetchError;
use chatlift_persist::PersistError;
use chatlift_types::{MessageError, Reply};

/// Why a single message could not be imported
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] MessageError),

    #[error("Failed to fetch file {file_id}: {source}")]
    RemoteFetch {
        file_id: String,
        #[source]
        source: FetchError,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),
}

/// A batch import that stopped before the end
///
/// Replies for messages before `index` were persisted and are returned in
/// `completed`; nothing at or after `index` was imported.
#[derive(Debug, Error)]
#[error("Import stopped at message {index}: {source}")]
pub struct BatchError {
    pub index: usize,
    pub completed: Vec<Reply>,
    #[source]
    pub source: ImportError,
}

impl BatchError {
    pub fn imported(&self) -> usize {
        self.completed.len()
    }
}
