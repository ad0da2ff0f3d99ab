use std::sync::Arc;
use std::time::Instant;

use chatlift_persist::Repository;
use chatlift_types::{Actor, ChatMessage, MessageError, Reply};
use serde_json::Value;

use crate::builder::ImporterBuilder;
use crate::collaborators::{ActorProvider, Clock};
use crate::error::{BatchError, ImportError};
use crate::renderer::ContentRenderer;
use crate::resolver::AccountResolver;

pub struct Importer {
    resolver: AccountResolver,
    renderer: ContentRenderer,
    replies: Arc<dyn Repository<Reply>>,
    clock: Arc<dyn Clock>,
    actors: Arc<dyn ActorProvider>,
}

impl Importer {
    pub(crate) fn new(
        resolver: AccountResolver,
        renderer: ContentRenderer,
        replies: Arc<dyn Repository<Reply>>,
        clock: Arc<dyn Clock>,
        actors: Arc<dyn ActorProvider>,
    ) -> Self {
        Self {
            resolver,
            renderer,
            replies,
            clock,
            actors,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> ImporterBuilder {
        ImporterBuilder::new()
    }

    /// Import `messages` as the actor reported by the configured provider
    pub async fn import(&self, messages: Vec<ChatMessage>) -> Result<Vec<Reply>, BatchError> {
        let actor = self.actors.current_actor();
        self.import_as(&actor, messages).await
    }

    /// Import `messages` in order, one reply per message
    ///
    /// Processing is sequential. The first failing message stops the batch;
    /// replies already created stay persisted and come back in
    /// [`BatchError::completed`].
    pub async fn import_as(
        &self,
        actor: &Actor,
        messages: Vec<ChatMessage>,
    ) -> Result<Vec<Reply>, BatchError> {
        self.run(actor, messages.into_iter().map(Ok::<_, MessageError>)).await
    }

    /// Like [`Importer::import_as`] but decodes each raw element just before
    /// importing it, so a malformed element fails at its own index
    pub async fn import_values(&self, actor: &Actor, values: Vec<Value>) -> Result<Vec<Reply>, BatchError> {
        self.run(actor, values.into_iter().map(ChatMessage::from_value))
            .await
    }

    async fn run<I>(&self, actor: &Actor, messages: I) -> Result<Vec<Reply>, BatchError>
    where
        I: ExactSizeIterator<Item = Result<ChatMessage, MessageError>>,
    {
        let total = messages.len();
        let started = Instant::now();
        tracing::info!(actor = %actor.id, total, "Starting import");

        let mut completed = Vec::with_capacity(total);
        for (index, message) in messages.enumerate() {
            let outcome = match message {
                Ok(message) => self.import_one(actor, message).await,
                Err(e) => Err(ImportError::from(e)),
            };

            match outcome {
                Ok(reply) => completed.push(reply),
                Err(source) => {
                    tracing::error!(
                        actor = %actor.id,
                        index,
                        imported = completed.len(),
                        error = %source,
                        "Import stopped"
                    );
                    return Err(BatchError {
                        index,
                        completed,
                        source,
                    });
                }
            }
        }

        tracing::info!(
            actor = %actor.id,
            imported = completed.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Import finished"
        );
        Ok(completed)
    }

    async fn import_one(&self, actor: &Actor, message: ChatMessage) -> Result<Reply, ImportError> {
        message.validate()?;

        let account = self
            .resolver
            .resolve(&message.source_name, &message.source_wx_id)
            .await?;
        let content = self.renderer.render(&message.content, actor).await?;

        let reply = Reply::new(content, account, actor.id.clone(), self.clock.now())
            .with_source_time(message.source_time, message.source_timestamp);
        let reply = self.replies.insert(reply).await?;

        tracing::debug!(
            reply_id = %reply.id,
            account_id = %reply.created_by_account.id,
            kind = message.content.type_tag(),
            "Imported message"
        );
        Ok(reply)
    }
}
