use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::MessageContent;
use crate::error::{MessageError, ParseError};

/// One message from a chat-history export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Sender display name as reported by the source platform
    pub source_name: String,
    /// Stable sender id on the source platform, the account dedup key
    pub source_wx_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<i64>,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn new(
        source_name: impl Into<String>,
        source_wx_id: impl Into<String>,
        content: MessageContent,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            source_wx_id: source_wx_id.into(),
            source_time: None,
            source_timestamp: None,
            content,
        }
    }

    pub fn with_source_time(mut self, time: impl Into<String>, timestamp: i64) -> Self {
        self.source_time = Some(time.into());
        self.source_timestamp = Some(timestamp);
        self
    }

    pub fn validate(&self) -> Result<(), MessageError> {
        if self.source_wx_id.trim().is_empty() {
            return Err(MessageError::BlankSenderId);
        }
        Ok(())
    }

    /// Decode and validate a single element of an export batch
    pub fn from_value(value: Value) -> Result<Self, MessageError> {
        let message: ChatMessage =
            serde_json::from_value(value).map_err(|e| MessageError::Json(e.to_string()))?;
        message.validate()?;
        Ok(message)
    }

    /// Decode a whole export batch, stopping at the first malformed element
    pub fn parse_batch(json: &str) -> Result<Vec<Self>, ParseError> {
        let values: Vec<Value> =
            serde_json::from_str(json).map_err(|e| ParseError::Batch(e.to_string()))?;

        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                Self::from_value(value).map_err(|source| ParseError::Message { index, source })
            })
            .collect()
    }
}
