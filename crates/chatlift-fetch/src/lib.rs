pub mod config;
pub mod error;
pub mod http;
pub mod traits;

pub use config::FetchConfig;
pub use error::FetchError;
pub use http::HttpFileFetcher;
pub use traits::{FetchedFile, FileFetcher};
