//! mdsnips-server
//!
//! HTTP surface for the snippet service: routing, request validation and the
//! perimeter middleware (basic auth, rate limiting, HTTPS redirect).

use std::sync::Arc;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validate;

use config::Config;
use middleware::rate_limit::RateLimiter;
use state::AppState;

/// Assemble the full application router.
pub fn router(state: AppState, config: &Config) -> Router {
    let mut api = Router::new()
        .route(
            "/md",
            post(routes::snippets::create_snippet)
                .patch(routes::snippets::update_snippet)
                .get(routes::snippets::list_snippets),
        )
        .route("/md/search", get(routes::snippets::search_snippets))
        .route(
            "/md/{id}",
            get(routes::snippets::get_snippet).delete(routes::snippets::delete_snippet),
        );

    if let Some(credentials) = &config.basic_auth {
        api = api.layer(axum_mw::from_fn_with_state(
            Arc::new(credentials.clone()),
            middleware::basic_auth::require_basic_auth,
        ));
    }

    let limiter = Arc::new(RateLimiter::new(&config.rate_limit));

    let mut app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .merge(api)
        .layer(axum_mw::from_fn_with_state(
            limiter,
            middleware::rate_limit::limit_mutations,
        ));

    if config.force_https {
        app = app.layer(axum_mw::from_fn(middleware::https::redirect_to_https));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
