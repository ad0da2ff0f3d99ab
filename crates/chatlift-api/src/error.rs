use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use chatlift_import::{BatchError, ImportError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Import(#[from] BatchError),

    #[error("Persistence error: {0}")]
    Persist(#[from] chatlift_persist::PersistError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::Import(ref e) => {
                let (status, message) = match &e.source {
                    ImportError::MalformedInput(_) => (StatusCode::BAD_REQUEST, e.source.to_string()),
                    ImportError::RemoteFetch { .. } => (StatusCode::BAD_GATEWAY, e.source.to_string()),
                    ImportError::Persistence(_) => {
                        tracing::error!("Import storage error: {}", e);
                        (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
                    }
                };
                (
                    status,
                    json!({
                        "error": message,
                        "failed_index": e.index,
                        "imported": e.imported(),
                    }),
                )
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Storage error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
