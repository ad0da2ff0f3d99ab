use std::sync::Arc;

use chatlift_fetch::FileFetcher;
use chatlift_persist::Repository;
use chatlift_types::{Actor, FileContent, FileRecord, MessageContent};

use crate::collaborators::{Clock, LinkBuilder};
use crate::error::ImportError;

/// Turns message content into reply markdown
///
/// Text passes through untouched. Attachments are re-hosted: the bytes are
/// pulled from the source platform, stored as a new file owned by the
/// importing actor, and replaced by a markdown link to the stored copy.
pub struct ContentRenderer {
    fetcher: Arc<dyn FileFetcher>,
    files: Arc<dyn Repository<FileRecord>>,
    links: Arc<dyn LinkBuilder>,
    clock: Arc<dyn Clock>,
}

impl ContentRenderer {
    pub fn new(
        fetcher: Arc<dyn FileFetcher>,
        files: Arc<dyn Repository<FileRecord>>,
        links: Arc<dyn LinkBuilder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            files,
            links,
            clock,
        }
    }

    pub async fn render(&self, content: &MessageContent, actor: &Actor) -> Result<String, ImportError> {
        match content {
            MessageContent::Text(text) => Ok(text.text.clone()),
            MessageContent::File(file) => self.render_file(file, actor).await,
        }
    }

    async fn render_file(&self, file: &FileContent, actor: &Actor) -> Result<String, ImportError> {
        let fetched = self
            .fetcher
            .fetch(&file.file_id)
            .await
            .map_err(|source| ImportError::RemoteFetch {
                file_id: file.file_id.clone(),
                source,
            })?;

        let record = FileRecord::imported(
            file.file_name.clone(),
            fetched.content_type,
            fetched.bytes,
            actor,
            file.file_id.clone(),
            self.clock.now(),
        );
        let stored = self.files.insert(record).await?;
        let link = self.links.file_link(&stored);

        tracing::debug!(
            source_file_id = %file.file_id,
            file_id = %stored.id,
            kind = file.kind.as_str(),
            size = stored.size,
            "Stored imported file"
        );

        Ok(markdown_link(&file.file_name, &link, file.kind.is_image()))
    }
}

fn markdown_link(name: &str, link: &str, image: bool) -> String {
    if image {
        format!("![{}]({}#middle)", name, link)
    } else {
        format!("[{}]({})", name, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_link_image() {
        assert_eq!(
            markdown_link("good-name.jpg", "http://mock-url/", true),
            "![good-name.jpg](http://mock-url/#middle)"
        );
    }

    #[test]
    fn test_markdown_link_attachment() {
        assert_eq!(
            markdown_link("notes.pdf", "http://mock-url/", false),
            "[notes.pdf](http://mock-url/)"
        );
    }
}
