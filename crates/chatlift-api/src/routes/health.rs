use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use chatlift_persist::Repository;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Reports the storage backend and whether it answers a cheap query.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend = state.config.storage.backend.as_str();
    let storage = match state.persist.accounts().count().await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!(backend, error = %e, "Storage health check failed");
            "disconnected"
        }
    };

    let mut services = HashMap::new();
    services.insert("storage".to_string(), format!("{} ({})", storage, backend));

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    })
}
