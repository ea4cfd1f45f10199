//! The store trait the ledger depends on.
//!
//! Handlers talk to [`WaitlistStore`] rather than to a concrete client, so
//! the Postgres adapter stays swappable. Methods mirror the ledger
//! operations one-to-one; none of them spans more than a single statement,
//! and multi-step flows (insert-then-read, read-then-count) are composed by
//! the caller and are not atomic as a whole.

use unigo_core::types::DbId;
use unigo_core::waitlist::AccessLevel;

use crate::models::waitlist_entry::{
    CreateWaitlistEntry, LeaderboardEntry, WaitlistEntry, WaitlistStats,
};

/// Unique-constraint names, used to classify store failures.
pub const UQ_EMAIL: &str = "uq_waitlist_entries_email";
pub const UQ_REFERRAL_CODE: &str = "uq_waitlist_entries_referral_code";

/// Store-level error taxonomy.
///
/// Unique violations are classified out of the backend error so callers can
/// tell an expected duplicate signup apart from a transient store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Row not found")]
    RowNotFound,

    #[error("Database error: {0}")]
    Backend(#[source] sqlx::Error),
}

impl StoreError {
    /// Whether this is a unique violation on the given constraint.
    pub fn is_unique_violation(&self, name: &str) -> bool {
        matches!(self, StoreError::UniqueViolation { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::RowNotFound,
            // PostgreSQL unique constraint violation: error code 23505.
            sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                StoreError::UniqueViolation { constraint }
            }
            other => StoreError::Backend(other),
        }
    }
}

/// Narrow repository interface over the waitlist table.
#[async_trait::async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Resolve a referral code to the referrer's id. Unknown codes resolve
    /// to `None`; they are not an error.
    async fn resolve_referrer(&self, referral_code: &str) -> Result<Option<DbId>, StoreError>;

    /// Insert a new entry and return its id.
    ///
    /// The store assigns the real referral code and position on insert;
    /// callers observe both through a follow-up [`find_by_id`] read.
    ///
    /// [`find_by_id`]: WaitlistStore::find_by_id
    async fn insert(&self, input: &CreateWaitlistEntry) -> Result<DbId, StoreError>;

    /// Fetch a single entry by id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<WaitlistEntry>, StoreError>;

    /// Fetch a single entry by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError>;

    /// Count entries still waiting with a smaller position than `position`.
    async fn count_ahead(&self, position: i64) -> Result<i64, StoreError>;

    /// Top referrers, ordered by referral count descending.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError>;

    /// Total number of entries.
    async fn count_all(&self) -> Result<i64, StoreError>;

    /// All entries, newest first (admin listing).
    async fn list_all(&self) -> Result<Vec<WaitlistEntry>, StoreError>;

    /// Set `status = 'invited'` on every named id, unconditionally, in a
    /// single statement. Returns the updated rows; ids with no row are
    /// silently absent from the result.
    async fn mark_invited(&self, ids: &[DbId]) -> Result<Vec<WaitlistEntry>, StoreError>;

    /// Set an entry's access level. Returns `None` if no row exists.
    async fn set_access_level(
        &self,
        id: DbId,
        level: AccessLevel,
    ) -> Result<Option<WaitlistEntry>, StoreError>;

    /// Aggregate counters over the whole ledger.
    async fn stats(&self) -> Result<WaitlistStats, StoreError>;
}
