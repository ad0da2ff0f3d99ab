use chrono::{DateTime, Utc};

use chatlift_types::{Actor, FileRecord};

/// Source of "now" for created records
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Produces the public link for a freshly stored file
pub trait LinkBuilder: Send + Sync {
    fn file_link(&self, file: &FileRecord) -> String;
}

impl<F> LinkBuilder for F
where
    F: Fn(&FileRecord) -> String + Send + Sync,
{
    fn file_link(&self, file: &FileRecord) -> String {
        self(file)
    }
}

/// Links of the form `{base_url}/files/{file_id}`
#[derive(Debug, Clone)]
pub struct BaseUrlLinkBuilder {
    base_url: String,
}

impl BaseUrlLinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl LinkBuilder for BaseUrlLinkBuilder {
    fn file_link(&self, file: &FileRecord) -> String {
        format!("{}/files/{}", self.base_url, file.id)
    }
}

/// Identity imports are recorded under when the caller does not pass one
pub trait ActorProvider: Send + Sync {
    fn current_actor(&self) -> Actor;
}

impl ActorProvider for Actor {
    fn current_actor(&self) -> Actor {
        self.clone()
    }
}
