use async_trait::async_trait;

use crate::error::Result;

/// An entity kind that can live in a [`Repository`]
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    /// Secondary key that must be unique across the store, if any
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// Insert + scan-all store for one entity kind
///
/// Implementations provide backend-specific storage. `insert` must reject a
/// record whose id or unique key is already present with
/// [`PersistError::Conflict`](crate::PersistError::Conflict); callers rely on
/// that for create-or-fetch.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Persist a new record and return it
    async fn insert(&self, record: T) -> Result<T>;

    /// Every stored record, oldest first
    async fn find_all(&self) -> Result<Vec<T>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let records = self.find_all().await?;
        Ok(records.into_iter().find(|record| record.id() == id))
    }

    async fn find_by_unique_key(&self, key: &str) -> Result<Option<T>> {
        let records = self.find_all().await?;
        Ok(records
            .into_iter()
            .find(|record| record.unique_key() == Some(key)))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.find_all().await?.len())
    }
}
