//! `PostgreSQL` account store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hamkra_core::{AccountId, Email};

use super::{AccountStore, RepositoryError, map_unique_violation, with_timeout};
use crate::models::Account;

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: AccountId,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

/// Account store backed by the `account` table.
///
/// Email uniqueness is enforced by the table's unique index, so concurrent
/// signups for the same address cannot both succeed.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgAccountStore {
    /// Create a new account store.
    #[must_use]
    pub const fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        let row = with_timeout(self.timeout, async {
            sqlx::query_as::<_, AccountRow>(
                r"
                INSERT INTO account (email, password_hash)
                VALUES ($1, $2)
                RETURNING id, email, password_hash, created_at
                ",
            )
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "email"))
        })
        .await?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let row = with_timeout(self.timeout, async {
            sqlx::query_as::<_, AccountRow>(
                r"
                SELECT id, email, password_hash, created_at
                FROM account
                WHERE email = $1
                ",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
        })
        .await?;

        row.map(Account::try_from).transpose()
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
