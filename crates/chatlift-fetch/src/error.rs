use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("File service returned {status} for {file_id}: {body}")]
    Status {
        file_id: String,
        status: u16,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid file id `{0}`")]
    InvalidFileId(String),

    #[error("Invalid fetch configuration: {0}")]
    Config(String),
}
