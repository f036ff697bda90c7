//! Router assembly.
//!
//! Combines the API and health routes with the static front end and the
//! shared middleware stack. Sentry layers are added by the binary.

use axum::{Router, extract::Request, middleware};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::ServerConfig;
use crate::middleware::{cors_layer, request_id_middleware};
use crate::routes;
use crate::state::AppState;

/// Build the complete application router.
///
/// Any `GET` that matches neither a route nor a file under
/// `config.static_dir` is answered with `index.html` so the single-page
/// front end can handle its own paths.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let index = config.static_dir.join("index.html");
    let frontend = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    routes::routes()
        .fallback_service(frontend)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Span for one HTTP request; `request_id` is filled in by the middleware.
fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
