//! Account domain types.

use chrono::{DateTime, Utc};

use hamkra_core::{AccountId, Email};

/// A signup credential record (domain type).
///
/// `password_hash` is an Argon2id PHC string; the plaintext is never stored.
#[derive(Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Email address, unique across all accounts.
    pub email: Email,
    /// PHC-encoded password hash including algorithm parameters and salt.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
