use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use chatlift_persist::Repository;

use crate::{error::{ApiError, ApiResult}, state::AppState};

/// Serve the bytes of a stored file
///
/// This is the target of the links written into imported replies.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let file = state
        .persist
        .files()
        .find_by_id(&file_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("file {}", file_id)))?;

    Ok(([(header::CONTENT_TYPE, file.content_type)], file.data).into_response())
}
