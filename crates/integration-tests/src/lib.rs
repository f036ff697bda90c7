//! Integration tests for the Hamkra shop backend.
//!
//! The tests talk HTTP to an already running server and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the server
//! cargo run -p hamkra-cli -- migrate
//! cargo run -p hamkra-server
//!
//! # Run integration tests
//! cargo test -p hamkra-integration-tests -- --ignored
//! ```
//!
//! Set `HAMKRA_BASE_URL` to target a server other than `http://localhost:3000`.

use reqwest::Client;
use uuid::Uuid;

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("HAMKRA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build a plain HTTP client.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// An email address no earlier test run has registered.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}
