//! Authentication service.
//!
//! Provides email + password signup and login. Passwords are hashed with
//! Argon2id; the PHC string stored per account carries the algorithm
//! parameters and salt, so hashes made with older parameters keep verifying.
//! Login is a stateless check: no session or token is issued.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use hamkra_core::Email;

use crate::db::{AccountStore, RepositoryError};
use crate::models::Account;

/// Authentication service.
///
/// Handles signup and credential checks against an [`AccountStore`].
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    hasher: Argon2<'static>,
}

impl AuthService {
    /// Create a new authentication service with the default Argon2id parameters.
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self::with_hasher(accounts, Argon2::default())
    }

    /// Create a service with explicit Argon2 parameters.
    #[must_use]
    pub const fn with_hasher(accounts: Arc<dyn AccountStore>, hasher: Argon2<'static>) -> Self {
        Self { accounts, hasher }
    }

    /// Register a new account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either value is empty.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn signup(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::MissingCredentials)?;
        if password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let password_hash = hash_password(self.hasher.clone(), password.to_owned()).await?;

        let account = self
            .accounts
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Find the account whose email and password both match exactly.
    ///
    /// A mismatch is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` on store failure and
    /// `AuthError::PasswordHash` if the stored hash cannot be read.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Ok(None);
        };

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            return Ok(None);
        };

        let matches = verify_password(
            self.hasher.clone(),
            password.to_owned(),
            account.password_hash.clone(),
        )
        .await?;

        Ok(matches.then_some(account))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.find_by_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }
}

/// Hash a password off the async workers.
async fn hash_password(hasher: Argon2<'static>, password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        hasher
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}

/// Verify a password against a stored PHC hash; the comparison is constant time.
async fn verify_password(
    hasher: Argon2<'static>,
    password: String,
    stored: String,
) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored)
            .map_err(|e| AuthError::PasswordHash(format!("unreadable stored hash: {e}")))?;

        match hasher.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswordHash(e.to_string())),
        }
    })
    .await
    .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::{Algorithm, Params, Version};

    use super::*;
    use crate::db::MemoryAccountStore;

    fn service() -> (AuthService, Arc<MemoryAccountStore>) {
        let store = Arc::new(MemoryAccountStore::new());
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
        let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        (AuthService::with_hasher(store.clone(), hasher), store)
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_password() {
        let (auth, store) = service();
        auth.signup("a@x.com", "p1").await.unwrap();

        let account = store
            .find_by_email(&Email::parse("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_ne!(account.password_hash, "p1");
        assert!(account.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_signup_twice_conflicts_regardless_of_password() {
        let (auth, _) = service();
        auth.signup("a@x.com", "p1").await.unwrap();

        let err = auth.signup("a@x.com", "p2").await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
        let err = auth.signup("a@x.com", "p1").await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_signup_requires_both_fields() {
        let (auth, _) = service();
        assert!(matches!(
            auth.signup("", "p1").await.unwrap_err(),
            AuthError::MissingCredentials
        ));
        assert!(matches!(
            auth.signup("a@x.com", "").await.unwrap_err(),
            AuthError::MissingCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_requires_exact_match() {
        let (auth, _) = service();
        auth.signup("a@x.com", "p1").await.unwrap();

        assert!(auth.login("a@x.com", "p1").await.is_ok());

        for (email, password) in [
            ("a@x.com", "p2"),
            ("a@x.com", "p"),
            ("a@x.com", "p1 "),
            ("A@x.com", "p1"),
            ("a@x.co", "p1"),
            ("", "p1"),
            ("a@x.com", ""),
        ] {
            let err = auth.login(email, password).await.unwrap_err();
            assert!(
                matches!(err, AuthError::InvalidCredentials),
                "expected rejection for {email:?}/{password:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_find_by_credentials_unknown_email_is_none() {
        let (auth, _) = service();
        assert!(
            auth.find_by_credentials("nobody@x.com", "p1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_an_error() {
        let (auth, store) = service();
        store
            .create(&Email::parse("a@x.com").unwrap(), "plaintext")
            .await
            .unwrap();

        let err = auth.login("a@x.com", "plaintext").await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordHash(_)));
    }

    #[tokio::test]
    async fn test_hash_made_with_other_params_still_verifies() {
        let (auth, store) = service();
        let stronger = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(Params::MIN_M_COST * 2, 2, 1, None).unwrap(),
        );
        let hash = hash_password(stronger, "p1".to_string()).await.unwrap();
        store
            .create(&Email::parse("a@x.com").unwrap(), &hash)
            .await
            .unwrap();

        assert!(auth.login("a@x.com", "p1").await.is_ok());
    }
}
