//! Order domain types.
//!
//! Orders are stored as submitted. Every field except the system-assigned
//! `id` and `createdAt` is optional, and the cart is an opaque list of JSON
//! values whose shape belongs to the front end.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use hamkra_core::OrderId;

/// An order submission as received from the client.
///
/// Unknown keys are ignored. `cart: null` is treated like an absent cart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Payment method tag (`bkash`, `nagad`, `cod`, ...).
    pub method: Option<String>,
    /// Line items, passed through untouched.
    pub cart: Option<Vec<Value>>,
    /// Order total, any finite JSON number.
    pub total: Option<f64>,
    /// bKash transaction reference.
    pub bkash_txn_id: Option<String>,
    /// Nagad transaction reference.
    pub nagad_txn_id: Option<String>,
    /// Cash-on-delivery shipping address.
    pub cod_address: Option<String>,
    /// Cash-on-delivery contact phone.
    pub cod_phone: Option<String>,
    /// Client-supplied creation time; the store assigns one when absent.
    #[serde(default, deserialize_with = "deserialize_client_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewOrder {
    /// Materialize the stored order, defaulting `created_at` to `now`.
    #[must_use]
    pub fn into_order(self, id: OrderId, now: DateTime<Utc>) -> Order {
        Order {
            id,
            method: self.method,
            cart: self.cart.unwrap_or_default(),
            total: self.total,
            bkash_txn_id: self.bkash_txn_id,
            nagad_txn_id: self.nagad_txn_id,
            cod_address: self.cod_address,
            cod_phone: self.cod_phone,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// A stored, immutable order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub cart: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bkash_txn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nagad_txn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Client timestamps
// =============================================================================

/// Timestamp forms browsers commonly send: `Date.now()` millis or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClientTimestamp {
    EpochMillis(i64),
    Text(String),
}

/// Accepts epoch milliseconds, RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` (read as
/// UTC), or a bare `YYYY-MM-DD` (midnight UTC).
fn deserialize_client_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<ClientTimestamp>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let parsed = match &raw {
        ClientTimestamp::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis),
        ClientTimestamp::Text(text) => parse_timestamp_text(text),
    };

    parsed.map(Some).ok_or_else(|| match raw {
        ClientTimestamp::EpochMillis(millis) => {
            de::Error::custom(format!("timestamp {millis} is out of range"))
        }
        ClientTimestamp::Text(text) => de::Error::custom(format!("unrecognized date '{text}'")),
    })
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
