//! Order submission and admin listing handlers.
//!
//! Both routes are unauthenticated.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use hamkra_core::OrderId;

use crate::error::{Result, add_breadcrumb};
use crate::models::{NewOrder, Order};
use crate::state::AppState;

/// Acknowledgment returned after an order is stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSaved {
    pub message: &'static str,
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
}

/// Store a submitted order.
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewOrder>, JsonRejection>,
) -> Result<Json<OrderSaved>> {
    let Json(order) = payload?;

    let saved = state.orders().create(order).await?;
    let order_id = saved.id.to_string();
    add_breadcrumb("orders", "Order saved", Some(&[("order_id", order_id.as_str())]));

    Ok(Json(OrderSaved {
        message: "Order saved",
        id: saved.id,
        created_at: saved.created_at,
    }))
}

/// List every order, most recent first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = state.orders().list_all().await?;
    Ok(Json(orders))
}
