//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if either store is unreachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let (accounts, orders) = tokio::join!(state.accounts().ping(), state.orders().ping());

    match (accounts, orders) {
        (Ok(()), Ok(())) => StatusCode::OK,
        (accounts, orders) => {
            if let Err(e) = accounts.and(orders) {
                tracing::warn!(error = %e, "Readiness check failed");
            }
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
