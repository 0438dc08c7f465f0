use axum::extract::Request;
use axum::http::header::{HOST, LOCATION};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Redirect plain-HTTP requests arriving through a TLS-terminating proxy.
pub async fn redirect_to_https(req: Request, next: Next) -> Response {
    let proto = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok());
    if proto == Some("https") {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");

    (
        StatusCode::MOVED_PERMANENTLY,
        [(LOCATION, format!("https://{host}{path}"))],
    )
        .into_response()
}
