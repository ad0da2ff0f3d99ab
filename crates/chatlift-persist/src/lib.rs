pub mod client;
pub mod dbs;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;

pub use client::PersistClient;
pub use error::PersistError;
pub use memory::InMemoryRepository;
pub use repository::{Record, Repository};

#[cfg(feature = "mongodb")]
pub use dbs::mongo::{MongoPersistenceClient, MongoRepository};
