//! Postgres adapter for the `waitlist_entries` table.

use sqlx::PgPool;
use unigo_core::types::DbId;
use unigo_core::waitlist::AccessLevel;

use crate::models::waitlist_entry::{
    CreateWaitlistEntry, LeaderboardEntry, WaitlistEntry, WaitlistStats,
};
use crate::store::{StoreError, WaitlistStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, university, phone, referrer_id, referral_code, \
                        referral_count, position, status, access_level, created_at";

/// Placeholder referral code supplied on insert; the `BEFORE INSERT`
/// trigger replaces it with the real unique code.
const CODE_PLACEHOLDER: &str = "PLACEHOLDER";

/// [`WaitlistStore`] implementation backed by a Postgres pool.
pub struct PgWaitlistStore {
    pool: PgPool,
}

impl PgWaitlistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WaitlistStore for PgWaitlistStore {
    async fn resolve_referrer(&self, referral_code: &str) -> Result<Option<DbId>, StoreError> {
        let id = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM waitlist_entries WHERE referral_code = $1",
        )
        .bind(referral_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(&self, input: &CreateWaitlistEntry) -> Result<DbId, StoreError> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO waitlist_entries
                (name, email, university, phone, referrer_id, referral_code)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.university)
        .bind(&input.phone)
        .bind(input.referrer_id)
        .bind(CODE_PLACEHOLDER)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<WaitlistEntry>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries WHERE id = $1");
        let entry = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries WHERE email = $1");
        let entry = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn count_ahead(&self, position: i64) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM waitlist_entries
             WHERE status = 'waiting' AND position < $1",
        )
        .bind(position)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        // Tie-break on position so the ordering is deterministic.
        let rows = sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT id, name, university, referral_count, position
             FROM waitlist_entries
             ORDER BY referral_count DESC, position ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_all(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM waitlist_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_all(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, WaitlistEntry>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn mark_invited(&self, ids: &[DbId]) -> Result<Vec<WaitlistEntry>, StoreError> {
        let query = format!(
            "UPDATE waitlist_entries SET status = 'invited'
             WHERE id = ANY($1)
             RETURNING {COLUMNS}"
        );
        let rows = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn set_access_level(
        &self,
        id: DbId,
        level: AccessLevel,
    ) -> Result<Option<WaitlistEntry>, StoreError> {
        let query = format!(
            "UPDATE waitlist_entries SET access_level = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .bind(level.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn stats(&self) -> Result<WaitlistStats, StoreError> {
        let stats = sqlx::query_as::<_, WaitlistStats>(
            "SELECT COUNT(*) AS total_signups,
                    COALESCE(SUM(referral_count), 0)::BIGINT AS total_referrals,
                    COUNT(*) FILTER (WHERE status = 'waiting') AS waiting_count,
                    COUNT(*) FILTER (WHERE status = 'invited') AS invited_count,
                    COUNT(*) FILTER (WHERE status = 'joined') AS joined_count
             FROM waitlist_entries",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}
