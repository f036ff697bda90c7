//! Business logic services for the shop backend.
//!
//! # Services
//!
//! - `auth` - Signup and password login over the account store

pub mod auth;
