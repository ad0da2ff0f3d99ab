use std::sync::Arc;

use chatlift_persist::{PersistError, Repository};
use chatlift_types::Account;

use crate::collaborators::Clock;
use crate::error::ImportError;
use crate::locks::KeyedLocks;

/// Maps a source-platform sender id onto exactly one durable account
///
/// Lookups and creation for the same `wx_id` run under a per-key lock, and a
/// uniqueness conflict from the store is answered by re-reading instead of
/// failing, so concurrent importers sharing one store still converge on a
/// single record.
pub struct AccountResolver {
    accounts: Arc<dyn Repository<Account>>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks,
}

impl AccountResolver {
    pub fn new(accounts: Arc<dyn Repository<Account>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            clock,
            locks: KeyedLocks::new(),
        }
    }

    /// Existing account for `source_wx_id`, or a new one named `source_name`
    ///
    /// The display name of an existing account is never updated.
    pub async fn resolve(&self, source_name: &str, source_wx_id: &str) -> Result<Account, ImportError> {
        let _guard = self.locks.acquire(source_wx_id).await;
        self.resolve_locked(source_name, source_wx_id).await
    }

    async fn resolve_locked(&self, source_name: &str, source_wx_id: &str) -> Result<Account, ImportError> {
        if let Some(existing) = self.accounts.find_by_unique_key(source_wx_id).await? {
            tracing::debug!(wx_id = source_wx_id, account_id = %existing.id, "Reusing account");
            return Ok(existing);
        }

        let account = Account::new(source_name, source_wx_id, self.clock.now());
        match self.accounts.insert(account).await {
            Ok(created) => {
                tracing::info!(
                    wx_id = source_wx_id,
                    account_id = %created.id,
                    display_name = %created.display_name,
                    "Created account"
                );
                Ok(created)
            }
            Err(PersistError::Conflict(reason)) => {
                // Another writer on the same store got there first
                tracing::warn!(wx_id = source_wx_id, %reason, "Account created concurrently, re-reading");
                self.accounts
                    .find_by_unique_key(source_wx_id)
                    .await?
                    .ok_or(ImportError::Persistence(PersistError::Conflict(reason)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::SystemClock;
    use async_trait::async_trait;
    use chatlift_persist::InMemoryRepository;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn resolver(repo: InMemoryRepository<Account>) -> AccountResolver {
        AccountResolver::new(Arc::new(repo), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn test_creates_then_reuses() {
        let repo = InMemoryRepository::new();
        let resolver = resolver(repo.clone());

        let first = resolver.resolve("Alice", "wx-a").await.unwrap();
        let second = resolver.resolve("Alice (work)", "wx-a").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.display_name, "Alice");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolution_creates_one_account() {
        let repo = InMemoryRepository::new();
        let resolver = Arc::new(resolver(repo.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = Arc::clone(&resolver);
                tokio::spawn(async move { resolver.resolve(&format!("name-{}", i), "wx-shared").await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    /// Store that hides an account written by "someone else" from the first lookup
    struct RacingStore {
        inner: InMemoryRepository<Account>,
        raced: AtomicBool,
    }

    #[async_trait]
    impl Repository<Account> for RacingStore {
        async fn insert(&self, record: Account) -> chatlift_persist::error::Result<Account> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                self.inner
                    .insert(Account::new("Other writer", record.wx_id.clone(), Utc::now()))
                    .await?;
            }
            self.inner.insert(record).await
        }

        async fn find_all(&self) -> chatlift_persist::error::Result<Vec<Account>> {
            self.inner.find_all().await
        }
    }

    #[tokio::test]
    async fn test_conflict_on_create_rereads() {
        let inner = InMemoryRepository::new();
        let store = RacingStore {
            inner: inner.clone(),
            raced: AtomicBool::new(false),
        };
        let resolver = AccountResolver::new(Arc::new(store), Arc::new(SystemClock));

        let account = resolver.resolve("Alice", "wx-a").await.unwrap();

        assert_eq!(account.display_name, "Other writer");
        assert_eq!(inner.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_locks_are_released() {
        let resolver = resolver(InMemoryRepository::new());
        resolver.resolve("Alice", "wx-a").await.unwrap();
        resolver.resolve("Bob", "wx-b").await.unwrap();
        assert!(resolver.locks.is_empty());
    }

    /// Store whose reads never complete
    struct StalledStore;

    #[async_trait]
    impl Repository<Account> for StalledStore {
        async fn insert(&self, record: Account) -> chatlift_persist::error::Result<Account> {
            Ok(record)
        }

        async fn find_all(&self) -> chatlift_persist::error::Result<Vec<Account>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_cancelled_resolves_leave_no_locks_behind() {
        let resolver = AccountResolver::new(Arc::new(StalledStore), Arc::new(SystemClock));

        for i in 0..100 {
            let wx_id = format!("wx-{}", i);
            let outcome = tokio::time::timeout(
                std::time::Duration::from_millis(1),
                resolver.resolve("n", &wx_id),
            )
            .await;
            assert!(outcome.is_err());
        }

        assert!(resolver.locks.is_empty());
    }
}
