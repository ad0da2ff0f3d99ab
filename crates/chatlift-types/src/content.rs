use serde::{Deserialize, Serialize};

use crate::error::MessageError;

/// Attachment kinds a chat export can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    File,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::File => "file",
        }
    }

    /// Map a `type` discriminator onto a file kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "image" => Some(FileKind::Image),
            "video" => Some(FileKind::Video),
            "audio" => Some(FileKind::Audio),
            "file" => Some(FileKind::File),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, FileKind::Image)
    }
}

/// Payload of one exported chat message
///
/// On the wire this is a flat object whose `type` field selects the variant:
/// absent or `"text"` is plain text, any [`FileKind`] tag is an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContent", into = "RawContent")]
pub enum MessageContent {
    Text(TextContent),
    File(FileContent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub file_id: String,
    pub file_name: String,
    pub kind: FileKind,
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextContent { text: text.into() })
    }

    pub fn file(kind: FileKind, file_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::File(FileContent {
            file_id: file_id.into(),
            file_name: file_name.into(),
            kind,
        })
    }

    pub fn image(file_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::file(FileKind::Image, file_id, file_name)
    }

    /// The wire discriminator for this payload
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::File(file) => file.kind.as_str(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(&content.text),
            Self::File(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
}

impl TryFrom<RawContent> for MessageContent {
    type Error = MessageError;

    fn try_from(raw: RawContent) -> Result<Self, Self::Error> {
        let tag = raw.kind.as_deref().unwrap_or("text");

        if tag == "text" {
            let text = raw.text.ok_or(MessageError::MissingField {
                kind: "text",
                field: "text",
            })?;
            return Ok(MessageContent::Text(TextContent { text }));
        }

        let kind = FileKind::from_tag(tag)
            .ok_or_else(|| MessageError::UnknownContentType(tag.to_string()))?;
        let file_id = raw.file_id.ok_or(MessageError::MissingField {
            kind: kind.as_str(),
            field: "fileId",
        })?;
        let file_name = raw.file_name.ok_or(MessageError::MissingField {
            kind: kind.as_str(),
            field: "fileName",
        })?;

        Ok(MessageContent::File(FileContent {
            file_id,
            file_name,
            kind,
        }))
    }
}

impl From<MessageContent> for RawContent {
    fn from(content: MessageContent) -> Self {
        match content {
            MessageContent::Text(TextContent { text }) => RawContent {
                kind: Some("text".to_string()),
                text: Some(text),
                file_id: None,
                file_name: None,
            },
            MessageContent::File(FileContent {
                file_id,
                file_name,
                kind,
            }) => RawContent {
                kind: Some(kind.as_str().to_string()),
                text: None,
                file_id: Some(file_id),
                file_name: Some(file_name),
            },
        }
    }
}
