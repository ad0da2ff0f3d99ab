use std::sync::Arc;

use chatlift_types::{Account, FileRecord, Reply};

use crate::memory::InMemoryRepository;
use crate::repository::Repository;

/// The three stores an import writes to
#[derive(Clone)]
pub struct PersistClient {
    accounts: Arc<dyn Repository<Account>>,
    files: Arc<dyn Repository<FileRecord>>,
    replies: Arc<dyn Repository<Reply>>,
}

impl PersistClient {
    pub fn new(
        accounts: Arc<dyn Repository<Account>>,
        files: Arc<dyn Repository<FileRecord>>,
        replies: Arc<dyn Repository<Reply>>,
    ) -> Self {
        Self {
            accounts,
            files,
            replies,
        }
    }

    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<Account>::new()),
            Arc::new(InMemoryRepository::<FileRecord>::new()),
            Arc::new(InMemoryRepository::<Reply>::new()),
        )
    }

    /// Connect to MongoDB and ensure the account uniqueness index exists
    #[cfg(feature = "mongodb")]
    pub async fn connect_mongo(mongodb_uri: &str, database: &str) -> crate::error::Result<Self> {
        let client = crate::dbs::mongo::MongoPersistenceClient::connect(mongodb_uri, database).await?;
        Ok(client.into_persist_client())
    }

    pub fn accounts(&self) -> Arc<dyn Repository<Account>> {
        Arc::clone(&self.accounts)
    }

    pub fn files(&self) -> Arc<dyn Repository<FileRecord>> {
        Arc::clone(&self.files)
    }

    pub fn replies(&self) -> Arc<dyn Repository<Reply>> {
        Arc::clone(&self.replies)
    }
}
