use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::repository::{Record, Repository};

/// Process-local repository backed by a vector
///
/// Clones share the same storage, so one handle can be given to the importer
/// and another kept for inspection.
pub struct InMemoryRepository<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn insert(&self, record: T) -> Result<T> {
        let mut records = self.records.write().await;

        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(PersistError::Conflict(format!("id {}", record.id())));
        }
        if let Some(key) = record.unique_key() {
            if records.iter().any(|existing| existing.unique_key() == Some(key)) {
                return Err(PersistError::Conflict(format!("key {}", key)));
            }
        }

        records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlift_types::{Account, Actor, FileRecord};
    use chrono::Utc;

    #[tokio::test]
    async fn test_insert_and_scan_keep_order() {
        let repo = InMemoryRepository::new();
        let first = repo.insert(Account::new("A", "wx-a", Utc::now())).await.unwrap();
        let second = repo.insert(Account::new("B", "wx-b", Utc::now())).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_unique_key_conflicts() {
        let repo = InMemoryRepository::new();
        repo.insert(Account::new("A", "wx-a", Utc::now())).await.unwrap();

        let err = repo
            .insert(Account::new("A again", "wx-a", Utc::now()))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = InMemoryRepository::new();
        let owner = Actor::new("admin");
        let file = FileRecord::imported("a.jpg", "image/jpeg", vec![1], &owner, "r-1", Utc::now());

        repo.insert(file.clone()).await.unwrap();
        assert!(repo.insert(file).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_records_without_unique_key_may_repeat_content() {
        let repo = InMemoryRepository::new();
        let owner = Actor::new("admin");
        for _ in 0..2 {
            let file = FileRecord::imported("a.jpg", "image/jpeg", vec![1], &owner, "r-1", Utc::now());
            repo.insert(file).await.unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryRepository::new();
        let account = repo.insert(Account::new("A", "wx-a", Utc::now())).await.unwrap();

        assert_eq!(repo.find_by_id(&account.id).await.unwrap(), Some(account.clone()));
        assert_eq!(repo.find_by_unique_key("wx-a").await.unwrap(), Some(account));
        assert_eq!(repo.find_by_unique_key("wx-missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let handle = repo.clone();
        repo.insert(Account::new("A", "wx-a", Utc::now())).await.unwrap();
        assert_eq!(handle.count().await.unwrap(), 1);
    }
}
