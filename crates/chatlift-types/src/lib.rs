pub mod account;
pub mod actor;
pub mod content;
pub mod error;
pub mod file;
pub mod message;
pub mod reply;

pub use account::Account;
pub use actor::Actor;
pub use content::{FileContent, FileKind, MessageContent, TextContent};
pub use error::{MessageError, ParseError};
pub use file::{FileRecord, IMPORTED_REPLY_CATEGORY};
pub use message::ChatMessage;
pub use reply::Reply;
