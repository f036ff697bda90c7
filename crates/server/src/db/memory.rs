//! In-memory stores.
//!
//! Same contracts as the `PostgreSQL` stores, held in process memory. Used by
//! the router tests so the HTTP layer can be exercised without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use hamkra_core::{AccountId, Email, OrderId};

use super::{AccountStore, OrderStore, RepositoryError};
use crate::models::{Account, NewOrder, Order};

#[derive(Default)]
struct Accounts {
    by_email: HashMap<Email, Account>,
    last_id: i32,
}

/// Account store held in a map keyed by email.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Accounts>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        // Check and insert under one write lock so concurrent signups race safely.
        let mut accounts = self.inner.write().await;
        if accounts.by_email.contains_key(email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        accounts.last_id += 1;
        let account = Account {
            id: AccountId::new(accounts.last_id),
            email: email.clone(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };
        accounts.by_email.insert(email.clone(), account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        Ok(self.inner.read().await.by_email.get(email).cloned())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Order store held in insertion order.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let order = order.into_order(OrderId::generate(), Utc::now());
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        // Reverse first: the stable sort then leaves equal timestamps newest-insert first.
        let mut orders: Vec<Order> = self.orders.read().await.iter().rev().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
