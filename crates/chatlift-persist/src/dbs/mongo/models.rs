use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::{spec::BinarySubtype, Binary};
use serde::{Deserialize, Serialize};

use chatlift_types::{Account, FileRecord, Reply};

/// MongoDB-specific Account document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub display_name: String,
    pub wx_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Insertion order among documents sharing a `created_at` millisecond
    #[serde(default = "ObjectId::new")]
    pub seq: ObjectId,
}

/// MongoDB-specific file document (bytes kept as BSON binary)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoFileRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub category: String,
    pub owner_id: String,
    pub source_file_id: String,
    pub size: i64,
    pub data: Binary,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Insertion order among documents sharing a `created_at` millisecond
    #[serde(default = "ObjectId::new")]
    pub seq: ObjectId,
}

/// MongoDB-specific Reply document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoReply {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    pub created_by_account: Account,
    pub imported_by: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Insertion order among documents sharing a `created_at` millisecond
    #[serde(default = "ObjectId::new")]
    pub seq: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<i64>,
}

// Conversions between database-agnostic and MongoDB-specific models

impl From<Account> for MongoAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name,
            wx_id: account.wx_id,
            created_at: account.created_at,
            seq: ObjectId::new(),
        }
    }
}

impl From<MongoAccount> for Account {
    fn from(account: MongoAccount) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name,
            wx_id: account.wx_id,
            created_at: account.created_at,
        }
    }
}

impl From<FileRecord> for MongoFileRecord {
    fn from(file: FileRecord) -> Self {
        Self {
            id: file.id,
            file_name: file.file_name,
            content_type: file.content_type,
            category: file.category,
            owner_id: file.owner_id,
            source_file_id: file.source_file_id,
            size: i64::try_from(file.size).unwrap_or(i64::MAX),
            data: Binary {
                subtype: BinarySubtype::Generic,
                bytes: file.data,
            },
            created_at: file.created_at,
            seq: ObjectId::new(),
        }
    }
}

impl From<MongoFileRecord> for FileRecord {
    fn from(file: MongoFileRecord) -> Self {
        Self {
            id: file.id,
            file_name: file.file_name,
            content_type: file.content_type,
            category: file.category,
            owner_id: file.owner_id,
            source_file_id: file.source_file_id,
            size: u64::try_from(file.size).unwrap_or_default(),
            data: file.data.bytes,
            created_at: file.created_at,
        }
    }
}

impl From<Reply> for MongoReply {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            content: reply.content,
            created_by_account: reply.created_by_account,
            imported_by: reply.imported_by,
            created_at: reply.created_at,
            seq: ObjectId::new(),
            source_time: reply.source_time,
            source_timestamp: reply.source_timestamp,
        }
    }
}

impl From<MongoReply> for Reply {
    fn from(reply: MongoReply) -> Self {
        Self {
            id: reply.id,
            content: reply.content,
            created_by_account: reply.created_by_account,
            imported_by: reply.imported_by,
            created_at: reply.created_at,
            source_time: reply.source_time,
            source_timestamp: reply.source_timestamp,
        }
    }
}
