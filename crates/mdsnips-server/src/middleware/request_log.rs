use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info};

/// Fallback label for requests that matched no route.
const UNMATCHED: &str = "<unmatched>";

/// Request logging middleware.
///
/// Emits one `api_request` event per request. The path is the route template
/// (`/md/{id}`), never the concrete URI, so snippet ids stay out of the logs.
/// Server errors are logged at error level.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED, MatchedPath::as_str)
        .to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        error!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            elapsed_ms,
            "api_request"
        );
    } else {
        info!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            elapsed_ms,
            "api_request"
        );
    }

    response
}
