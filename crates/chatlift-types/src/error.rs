use thiserror::Error;

/// Why a single exported message could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("unknown content type `{0}`")]
    UnknownContentType(String),

    #[error("{kind} content is missing `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("sourceWxId must not be blank")]
    BlankSenderId,

    #[error("invalid message JSON: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("batch is not a JSON array of messages: {0}")]
    Batch(String),

    #[error("message {index} is malformed: {source}")]
    Message {
        index: usize,
        #[source]
        source: MessageError,
    },
}

impl ParseError {
    /// Position of the offending message, if the batch itself was readable
    pub fn index(&self) -> Option<usize> {
        match self {
            ParseError::Batch(_) => None,
            ParseError::Message { index, .. } => Some(*index),
        }
    }
}
