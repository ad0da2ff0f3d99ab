use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::routes::imports::ACTOR_ID_HEADER;

/// Request logging middleware
pub async fn log_request(
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let actor = req
        .headers()
        .get(ACTOR_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        actor = actor.as_deref().unwrap_or("-"),
        duration_ms = %duration.as_millis(),
        "Request processed"
    );

    response
}
