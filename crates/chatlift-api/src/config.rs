use config::{Config as ConfigLoader, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub fetch: FetchSettings,
    pub links: LinksConfig,
    pub import: ImportConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub fetch_access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Largest accepted import body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Mongodb,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Mongodb => "mongodb",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database: String,
}

/// Where attachment bytes are downloaded from
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Public root that `/files/{id}` links are built on
    pub public_base_url: String,
}

/// Identity used when a request carries no actor headers
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub default_actor_id: String,
    #[serde(default)]
    pub default_actor_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Environment variables that override single keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("SERVER_REQUEST_TIMEOUT_SECS", "server.request_timeout_secs"),
    ("SERVER_MAX_BODY_BYTES", "server.max_body_bytes"),
    ("STORAGE_BACKEND", "storage.backend"),
    ("STORAGE_DATABASE", "storage.database"),
    ("FETCH_BASE_URL", "fetch.base_url"),
    ("FETCH_TIMEOUT_MS", "fetch.timeout_ms"),
    ("LINKS_PUBLIC_BASE_URL", "links.public_base_url"),
    ("IMPORT_DEFAULT_ACTOR_ID", "import.default_actor_id"),
    ("IMPORT_DEFAULT_ACTOR_NAME", "import.default_actor_name"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (SERVER_, STORAGE_, FETCH_, LINKS_, IMPORT_, LOG_)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let mut builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        // 3. Environment variables override everything
        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        if cfg.storage.backend == StorageBackend::Mongodb {
            cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
                ConfigError::Message(
                    "MONGODB_URI environment variable is required for the mongodb backend".to_string(),
                )
            })?;
        }
        cfg.fetch_access_token = std::env::var("FETCH_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [cors]
        enabled = true
        origins = ["http://localhost:3000"]

        [storage]
        backend = "memory"
        database = "chatlift_test"

        [fetch]
        base_url = "http://files.internal/media"
        timeout_ms = 5000

        [links]
        public_base_url = "https://forum.example"

        [import]
        default_actor_id = "importer"

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_secs, 300);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.fetch.timeout_ms, 5000);
        assert_eq!(config.import.default_actor_id, "importer");
        assert!(config.import.default_actor_name.is_none());
        assert!(config.fetch_access_token.is_none());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let toml = SAMPLE.replace(r#"backend = "memory""#, r#"backend = "sqlite""#);
        assert!(toml::from_str::<Config>(&toml).is_err());
    }

    #[test]
    fn test_default_file_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
        let config = Config::from_file(path).unwrap();
        assert_eq!(config.links.public_base_url, "http://localhost:8080");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }
}
