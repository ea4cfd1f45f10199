//! Postgres persistence for the waitlist ledger.
//!
//! The store boundary is the [`WaitlistStore`] trait; [`PgWaitlistStore`]
//! is its Postgres adapter. The migrations in `migrations/` encode the
//! store-side contract the ledger relies on: unique email / referral code /
//! position, trigger-assigned positions and codes, and the referral-count
//! trigger.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use repositories::PgWaitlistStore;
pub use store::{StoreError, WaitlistStore};

pub type DbPool = sqlx::PgPool;

/// Embedded migrations, applied at startup and by `#[sqlx::test]`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
