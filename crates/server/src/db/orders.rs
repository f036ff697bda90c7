//! `PostgreSQL` order store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use hamkra_core::OrderId;

use super::{OrderStore, RepositoryError, with_timeout};
use crate::models::{NewOrder, Order};

const ORDER_COLUMNS: &str = "id, method, cart, total, bkash_txn_id, nagad_txn_id, \
                             cod_address, cod_phone, created_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    method: Option<String>,
    cart: Json<Vec<Value>>,
    total: Option<f64>,
    bkash_txn_id: Option<String>,
    nagad_txn_id: Option<String>,
    cod_address: Option<String>,
    cod_phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            method: row.method,
            cart: row.cart.0,
            total: row.total,
            bkash_txn_id: row.bkash_txn_id,
            nagad_txn_id: row.nagad_txn_id,
            cod_address: row.cod_address,
            cod_phone: row.cod_phone,
            created_at: row.created_at,
        }
    }
}

/// Order store backed by the `shop_order` table.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgOrderStore {
    /// Create a new order store.
    #[must_use]
    pub const fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let order = order.into_order(OrderId::generate(), Utc::now());
        let sql = format!(
            "INSERT INTO shop_order ({ORDER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ORDER_COLUMNS}"
        );

        let row = with_timeout(self.timeout, async {
            sqlx::query_as::<_, OrderRow>(&sql)
                .bind(order.id)
                .bind(&order.method)
                .bind(Json(&order.cart))
                .bind(order.total)
                .bind(&order.bkash_txn_id)
                .bind(&order.nagad_txn_id)
                .bind(&order.cod_address)
                .bind(&order.cod_phone)
                .bind(order.created_at)
                .fetch_one(&self.pool)
                .await
                .map_err(RepositoryError::from)
        })
        .await?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM shop_order ORDER BY created_at DESC, seq DESC");

        let rows = with_timeout(self.timeout, async {
            sqlx::query_as::<_, OrderRow>(&sql)
                .fetch_all(&self.pool)
                .await
                .map_err(RepositoryError::from)
        })
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        with_timeout(self.timeout, async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(RepositoryError::from)
        })
        .await
    }
}
