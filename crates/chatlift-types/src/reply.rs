use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;

/// Discussion reply materialized from one imported chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub content: String,
    pub created_by_account: Account,
    /// Actor that ran the import
    pub imported_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<i64>,
}

impl Reply {
    pub fn new(
        content: impl Into<String>,
        created_by_account: Account,
        imported_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            created_by_account,
            imported_by: imported_by.into(),
            created_at,
            source_time: None,
            source_timestamp: None,
        }
    }

    pub fn with_source_time(mut self, time: Option<String>, timestamp: Option<i64>) -> Self {
        self.source_time = time;
        self.source_timestamp = timestamp;
        self
    }
}
