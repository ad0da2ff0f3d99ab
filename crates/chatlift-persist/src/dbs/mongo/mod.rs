pub mod client;
pub mod models;
pub mod repository;

pub use client::MongoPersistenceClient;
pub use repository::MongoRepository;
