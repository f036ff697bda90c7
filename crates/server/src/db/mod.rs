//! Persistence for accounts and orders.
//!
//! # Stores
//!
//! - [`AccountStore`] - unique-by-email credential records
//! - [`OrderStore`] - anonymous order submissions, listed newest-first
//!
//! Each store has a `PostgreSQL` implementation ([`accounts::PgAccountStore`],
//! [`orders::PgOrderStore`]) and an in-memory one ([`memory`]) used by tests.
//!
//! # Tables
//!
//! - `account` - email (unique), Argon2id password hash
//! - `shop_order` - order fields, `cart` as JSONB
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p hamkra-cli -- migrate
//! ```

pub mod accounts;
pub mod memory;
pub mod orders;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use hamkra_core::Email;

use crate::models::{Account, NewOrder, Order};

pub use accounts::PgAccountStore;
pub use memory::{MemoryAccountStore, MemoryOrderStore};
pub use orders::PgOrderStore;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The store did not answer within the configured bound.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Credential records keyed by email.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    async fn create(&self, email: &Email, password_hash: &str)
    -> Result<Account, RepositoryError>;

    /// Exact-match lookup by email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Immutable order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order, assigning its ID and (if absent) its creation time.
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// All orders, most recently created first.
    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run a store future, failing with `RepositoryError::Timeout` once `limit` elapses.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| RepositoryError::Timeout(limit))?
}

/// Map a sqlx error, turning unique violations into `RepositoryError::Conflict`.
fn map_unique_violation(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
