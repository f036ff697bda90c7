//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (stores reachable)
//!
//! # API
//! POST /api/signup             - Create an account
//! POST /api/login              - Check credentials (no session issued)
//! POST /api/orders             - Submit an order
//! GET  /api/orders             - List all orders, newest first
//!
//! # Front end
//! GET  /*                      - Static assets, falling back to index.html
//! ```

pub mod auth;
pub mod health;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/orders", get(orders::list).post(orders::create))
}

/// Create all dynamic routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
