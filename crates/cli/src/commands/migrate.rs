//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! hamkra-cli migrate
//! hamkra-cli migrate --status
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (also read from `.env`)
//!
//! # Migration Files
//!
//! The SQL files live in `crates/server/migrations/` and are embedded into
//! this binary at compile time.

use std::collections::HashSet;

use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::migrate::Migrator;

static MIGRATOR: Migrator = sqlx::migrate!("../server/migrations");

/// Postgres SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Errors from the migration commands.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

async fn connect() -> Result<PgPool, MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(hamkra_server::db::create_pool(&database_url).await?)
}

/// Apply every pending migration.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!(available = MIGRATOR.iter().count(), "Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Print each embedded migration and whether it has been applied.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the database is unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;

    let applied: HashSet<i64> = match sqlx::query_scalar::<_, i64>(
        "SELECT version FROM _sqlx_migrations WHERE success",
    )
    .fetch_all(&pool)
    .await
    {
        Ok(versions) => versions.into_iter().collect(),
        // The bookkeeping table does not exist until the first run.
        Err(e) if is_undefined_table(&e) => HashSet::new(),
        Err(e) => return Err(e.into()),
    };

    #[allow(clippy::print_stdout)]
    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        println!("{:>14}  {:<8} {}", migration.version, state, migration.description);
    }

    Ok(())
}

/// Whether the error is Postgres reporting a missing table.
fn is_undefined_table(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNDEFINED_TABLE))
}
