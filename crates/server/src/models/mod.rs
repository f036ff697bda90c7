//! Domain models for the shop backend.
//!
//! These types represent validated domain objects separate from database row types.

pub mod account;
pub mod order;

pub use account::Account;
pub use order::{NewOrder, Order};
