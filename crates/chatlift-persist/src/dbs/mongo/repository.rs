use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use crate::error::{PersistError, Result};
use crate::repository::{Record, Repository};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Repository over one MongoDB collection
///
/// `T` is the database-agnostic record, `M` the document shape stored in the
/// collection.
pub struct MongoRepository<T, M: Send + Sync> {
    collection: Collection<M>,
    unique_field: Option<&'static str>,
    _record: PhantomData<fn() -> T>,
}

impl<T, M: Send + Sync> Clone for MongoRepository<T, M> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            unique_field: self.unique_field,
            _record: PhantomData,
        }
    }
}

impl<T, M: Send + Sync> MongoRepository<T, M> {
    pub fn new(client: &Client, db_name: &str, collection: &str) -> Self {
        let collection = client.database(db_name).collection(collection);
        Self {
            collection,
            unique_field: None,
            _record: PhantomData,
        }
    }

    /// Document field backing [`Record::unique_key`]
    pub fn with_unique_field(mut self, field: &'static str) -> Self {
        self.unique_field = Some(field);
        self
    }

    /// Create the unique index for the configured field (idempotent)
    pub async fn ensure_unique_index(&self) -> Result<()> {
        let Some(field) = self.unique_field else {
            return Ok(());
        };

        let mut keys = Document::new();
        keys.insert(field, 1);
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::debug!(
            collection = %self.collection.name(),
            field,
            "Unique index ensured"
        );
        Ok(())
    }
}

#[async_trait]
impl<T, M> Repository<T> for MongoRepository<T, M>
where
    T: Record + From<M>,
    M: From<T> + Serialize + DeserializeOwned + Unpin + Send + Sync + 'static,
{
    async fn insert(&self, record: T) -> Result<T> {
        let document = M::from(record.clone());
        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| map_insert_error(e, record.id()))?;
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let documents: Vec<M> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1, "seq": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(T::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let found = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(found.map(T::from))
    }

    async fn find_by_unique_key(&self, key: &str) -> Result<Option<T>> {
        let Some(field) = self.unique_field else {
            return Ok(None);
        };

        let mut filter = Document::new();
        filter.insert(field, key);
        let found = self.collection.find_one(filter).await?;
        Ok(found.map(T::from))
    }

    async fn count(&self) -> Result<usize> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count as usize)
    }
}

fn map_insert_error(err: mongodb::error::Error, id: &str) -> PersistError {
    if is_duplicate_key(&err) {
        PersistError::Conflict(format!("id {}", id))
    } else {
        PersistError::Database(err)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
