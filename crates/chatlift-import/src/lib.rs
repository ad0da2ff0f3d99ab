pub mod builder;
pub mod collaborators;
pub mod error;
pub mod importer;
pub mod locks;
pub mod renderer;
pub mod resolver;

pub use builder::ImporterBuilder;
pub use collaborators::{ActorProvider, BaseUrlLinkBuilder, Clock, FixedClock, LinkBuilder, SystemClock};
pub use error::{BatchError, ImportError};
pub use importer::Importer;
pub use renderer::ContentRenderer;
pub use resolver::AccountResolver;

// Re-export the data model callers hand to and get back from the importer
pub use chatlift_types::{Account, Actor, ChatMessage, FileKind, FileRecord, MessageContent, Reply};
