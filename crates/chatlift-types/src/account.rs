use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable sender account, unique per `wx_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub display_name: String,
    pub wx_id: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        display_name: impl Into<String>,
        wx_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name.into(),
            wx_id: wx_id.into(),
            created_at,
        }
    }
}
