use mongodb::Client;
use std::sync::Arc;

use chatlift_types::{Account, FileRecord, Reply};

use crate::client::PersistClient;
use crate::dbs::mongo::models::{MongoAccount, MongoFileRecord, MongoReply};
use crate::dbs::mongo::repository::MongoRepository;
use crate::error::{PersistError, Result};

pub struct MongoPersistenceClient {
    accounts: MongoRepository<Account, MongoAccount>,
    files: MongoRepository<FileRecord, MongoFileRecord>,
    replies: MongoRepository<Reply, MongoReply>,
}

impl MongoPersistenceClient {
    /// Connect to MongoDB and create client
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let accounts = MongoRepository::new(&client, database, "accounts").with_unique_field("wx_id");
        accounts.ensure_unique_index().await?;

        let files = MongoRepository::new(&client, database, "files");
        let replies = MongoRepository::new(&client, database, "replies");

        tracing::info!(database, "Connected to MongoDB");

        Ok(Self {
            accounts,
            files,
            replies,
        })
    }

    pub fn into_persist_client(self) -> PersistClient {
        PersistClient::new(
            Arc::new(self.accounts),
            Arc::new(self.files),
            Arc::new(self.replies),
        )
    }
}
