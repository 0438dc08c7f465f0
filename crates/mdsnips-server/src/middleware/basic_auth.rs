use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::BasicAuthConfig;

/// HTTP basic auth middleware.
///
/// Guards the whole API behind one shared user/password pair. This is a
/// perimeter check only; it says nothing about who owns a snippet.
pub async fn require_basic_auth(
    State(credentials): State<Arc<BasicAuthConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Basic "))
        .and_then(|encoded| STANDARD.decode(encoded.trim()).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .is_some_and(|decoded| match decoded.split_once(':') {
            Some((user, pass)) => user == credentials.user && pass == credentials.pass,
            None => false,
        });

    if authorized {
        next.run(req).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Basic realm=\"Forbidden\"")],
        )
            .into_response()
    }
}
