use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use chatlift_types::{Actor, Reply};

use crate::{config::ImportConfig, error::{ApiError, ApiResult}, state::AppState};

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub replies: Vec<Reply>,
}

/// Import a chat-history export
///
/// The body is a JSON array of messages. Elements are decoded one at a time
/// while importing, so a malformed element is reported with its index and
/// the replies created before it.
pub async fn import_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<ImportResponse>> {
    let values: Vec<Value> = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Body must be a JSON array of messages: {}", e)))?;

    let actor = actor_from_headers(&headers, &state.config.import);
    tracing::info!(actor = %actor.id, messages = values.len(), "Import requested");

    let replies = state.importer.import_values(&actor, values).await?;

    Ok(Json(ImportResponse { replies }))
}

fn actor_from_headers(headers: &HeaderMap, defaults: &ImportConfig) -> Actor {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    match header(ACTOR_ID_HEADER) {
        Some(id) => {
            let actor = Actor::new(id);
            match header(ACTOR_NAME_HEADER) {
                Some(name) => actor.with_display_name(name),
                None => actor,
            }
        }
        None => {
            let actor = Actor::new(defaults.default_actor_id.clone());
            match &defaults.default_actor_name {
                Some(name) => actor.with_display_name(name.clone()),
                None => actor,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn defaults() -> ImportConfig {
        ImportConfig {
            default_actor_id: "importer".to_string(),
            default_actor_name: Some("Chat importer".to_string()),
        }
    }

    #[test]
    fn test_actor_defaults_without_headers() {
        let actor = actor_from_headers(&HeaderMap::new(), &defaults());
        assert_eq!(actor, Actor::new("importer").with_display_name("Chat importer"));
    }

    #[test]
    fn test_actor_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(ACTOR_ID_HEADER, HeaderValue::from_static("mod-7"));
        headers.insert(ACTOR_NAME_HEADER, HeaderValue::from_static("Moderator"));

        let actor = actor_from_headers(&headers, &defaults());
        assert_eq!(actor, Actor::new("mod-7").with_display_name("Moderator"));
    }

    #[test]
    fn test_blank_actor_header_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert(ACTOR_ID_HEADER, HeaderValue::from_static("  "));

        let actor = actor_from_headers(&headers, &defaults());
        assert_eq!(actor.id, "importer");
    }
}
