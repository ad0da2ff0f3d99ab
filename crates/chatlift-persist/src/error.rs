use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A record with the same id or unique key already exists
    #[error("Duplicate record: {0}")]
    Conflict(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, PersistError::Conflict(_))
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
