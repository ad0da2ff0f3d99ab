use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatlift_api::{
    build_router,
    config::{Config, StorageBackend},
    state::AppState,
};
use chatlift_fetch::{FetchConfig, HttpFileFetcher};
use chatlift_import::{Actor, BaseUrlLinkBuilder, Importer};
use chatlift_persist::PersistClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Chatlift API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize persistence client
    let persist = connect_storage(&config).await?;

    // Initialize file fetcher
    let mut fetch_config = FetchConfig::new(config.fetch.base_url.clone())
        .with_timeout_ms(config.fetch.timeout_ms);
    if let Some(token) = &config.fetch_access_token {
        fetch_config = fetch_config.with_access_token(token.clone());
    }
    let fetcher = HttpFileFetcher::new(fetch_config)?;
    tracing::info!("Fetching attachments from {}", config.fetch.base_url);

    let mut default_actor = Actor::new(config.import.default_actor_id.clone());
    if let Some(name) = &config.import.default_actor_name {
        default_actor = default_actor.with_display_name(name.clone());
    }

    let importer = Importer::builder()
        .persist(&persist)
        .fetcher(Arc::new(fetcher))
        .link_builder(Arc::new(BaseUrlLinkBuilder::new(config.links.public_base_url.clone())))
        .actor_provider(Arc::new(default_actor))
        .build()?;

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), persist, importer));

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_storage(config: &Config) -> anyhow::Result<PersistClient> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, imported data is lost on restart");
            Ok(PersistClient::in_memory())
        }
        #[cfg(feature = "mongodb")]
        StorageBackend::Mongodb => {
            tracing::info!("Connecting to MongoDB");
            let client = PersistClient::connect_mongo(&config.mongodb_uri, &config.storage.database).await?;
            tracing::info!(database = %config.storage.database, "MongoDB connected");
            Ok(client)
        }
        #[cfg(not(feature = "mongodb"))]
        StorageBackend::Mongodb => {
            anyhow::bail!("storage.backend = \"mongodb\" requires the `mongodb` feature")
        }
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
