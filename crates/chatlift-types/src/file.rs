use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

/// Category tag carried by every file created from an imported message
pub const IMPORTED_REPLY_CATEGORY: &str = "imported-reply";

/// Stored copy of a fetched attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub category: String,
    pub owner_id: String,
    /// File id on the source platform the bytes were fetched from
    pub source_file_id: String,
    pub size: u64,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// New record for an attachment fetched during an import
    pub fn imported(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
        owner: &Actor,
        source_file_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            category: IMPORTED_REPLY_CATEGORY.to_string(),
            owner_id: owner.id.clone(),
            source_file_id: source_file_id.into(),
            size: data.len() as u64,
            data,
            created_at,
        }
    }
}
