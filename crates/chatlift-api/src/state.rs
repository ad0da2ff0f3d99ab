use std::sync::Arc;
use chatlift_import::Importer;
use chatlift_persist::PersistClient;
use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The importer keeps its per-sender locks inside, so one instance is built
/// at startup and shared by every request.
pub struct AppState {
    pub config: Arc<Config>,
    pub persist: PersistClient,
    pub importer: Arc<Importer>,
}

impl AppState {
    pub fn new(config: Config, persist: PersistClient, importer: Importer) -> Self {
        Self {
            config: Arc::new(config),
            persist,
            importer: Arc::new(importer),
        }
    }
}
