//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use argon2::Argon2;
use sqlx::PgPool;

use crate::db::{AccountStore, OrderStore, PgAccountStore, PgOrderStore};
use crate::services::auth::AuthService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The stores are built once at
/// startup and handed to every request through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    accounts: Arc<dyn AccountStore>,
    orders: Arc<dyn OrderStore>,
    auth: AuthService,
}

impl AppState {
    /// Create application state over the given stores.
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self::with_hasher(accounts, orders, Argon2::default())
    }

    /// Create application state with explicit Argon2 parameters.
    #[must_use]
    pub fn with_hasher(
        accounts: Arc<dyn AccountStore>,
        orders: Arc<dyn OrderStore>,
        hasher: Argon2<'static>,
    ) -> Self {
        let auth = AuthService::with_hasher(Arc::clone(&accounts), hasher);

        Self {
            inner: Arc::new(AppStateInner {
                accounts,
                orders,
                auth,
            }),
        }
    }

    /// Create application state backed by `PostgreSQL`.
    ///
    /// # Arguments
    ///
    /// * `pool` - `PostgreSQL` connection pool
    /// * `timeout` - Upper bound on each store call
    #[must_use]
    pub fn from_pool(pool: PgPool, timeout: Duration) -> Self {
        let accounts = Arc::new(PgAccountStore::new(pool.clone(), timeout));
        let orders = Arc::new(PgOrderStore::new(pool, timeout));
        Self::new(accounts, orders)
    }

    /// Get a reference to the account store.
    #[must_use]
    pub fn accounts(&self) -> &dyn AccountStore {
        self.inner.accounts.as_ref()
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderStore {
        self.inner.orders.as_ref()
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
