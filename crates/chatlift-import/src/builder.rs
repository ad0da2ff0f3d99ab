use std::sync::Arc;
use anyhow::{Result, anyhow};

use chatlift_fetch::FileFetcher;
use chatlift_persist::{PersistClient, Repository};
use chatlift_types::{Account, FileRecord, Reply};

use crate::collaborators::{ActorProvider, Clock, LinkBuilder, SystemClock};
use crate::importer::Importer;
use crate::renderer::ContentRenderer;
use crate::resolver::AccountResolver;

/// Builder for constructing an Importer from its collaborators
pub struct ImporterBuilder {
    accounts: Option<Arc<dyn Repository<Account>>>,
    files: Option<Arc<dyn Repository<FileRecord>>>,
    replies: Option<Arc<dyn Repository<Reply>>>,
    fetcher: Option<Arc<dyn FileFetcher>>,
    link_builder: Option<Arc<dyn LinkBuilder>>,
    actor_provider: Option<Arc<dyn ActorProvider>>,
    clock: Arc<dyn Clock>,
}

impl ImporterBuilder {
    pub fn new() -> Self {
        Self {
            accounts: None,
            files: None,
            replies: None,
            fetcher: None,
            link_builder: None,
            actor_provider: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use all three repositories of a PersistClient
    pub fn persist(self, client: &PersistClient) -> Self {
        self.accounts(client.accounts())
            .files(client.files())
            .replies(client.replies())
    }

    pub fn accounts(mut self, repo: Arc<dyn Repository<Account>>) -> Self {
        self.accounts = Some(repo);
        self
    }

    pub fn files(mut self, repo: Arc<dyn Repository<FileRecord>>) -> Self {
        self.files = Some(repo);
        self
    }

    pub fn replies(mut self, repo: Arc<dyn Repository<Reply>>) -> Self {
        self.replies = Some(repo);
        self
    }

    /// Set the source of attachment bytes
    pub fn fetcher(mut self, fetcher: Arc<dyn FileFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn link_builder(mut self, links: Arc<dyn LinkBuilder>) -> Self {
        self.link_builder = Some(links);
        self
    }

    /// Identity used by [`Importer::import`]
    pub fn actor_provider(mut self, actors: Arc<dyn ActorProvider>) -> Self {
        self.actor_provider = Some(actors);
        self
    }

    /// Override the clock, defaults to the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the Importer
    pub fn build(self) -> Result<Importer> {
        let accounts = self.accounts
            .ok_or_else(|| anyhow!("Account repository is required"))?;
        let files = self.files
            .ok_or_else(|| anyhow!("File repository is required"))?;
        let replies = self.replies
            .ok_or_else(|| anyhow!("Reply repository is required"))?;
        let fetcher = self.fetcher
            .ok_or_else(|| anyhow!("File fetcher is required"))?;
        let link_builder = self.link_builder
            .ok_or_else(|| anyhow!("Link builder is required"))?;
        let actor_provider = self.actor_provider
            .ok_or_else(|| anyhow!("Actor provider is required"))?;

        let resolver = AccountResolver::new(accounts, Arc::clone(&self.clock));
        let renderer = ContentRenderer::new(fetcher, files, link_builder, Arc::clone(&self.clock));

        Ok(Importer::new(resolver, renderer, replies, self.clock, actor_provider))
    }
}

impl Default for ImporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
