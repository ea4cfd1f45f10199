//! Waitlist entry model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use unigo_core::types::{DbId, Timestamp};

/// Full row from the `waitlist_entries` table.
///
/// `status` and `access_level` are stored as CHECK-constrained text; parse
/// them with `unigo_core::waitlist` when enum semantics are needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitlistEntry {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub university: String,
    pub phone: Option<String>,
    /// Entry that referred this signup, resolved from a referral code at
    /// creation time. Never mutated afterwards.
    pub referrer_id: Option<DbId>,
    /// Opaque unique token, assigned by the store on insert.
    pub referral_code: String,
    /// Number of entries naming this one as their referrer. Maintained by
    /// a store-side trigger.
    pub referral_count: i32,
    /// Ordinal rank among all entries, assigned once at insert. Lower is
    /// earlier.
    pub position: i64,
    pub status: String,
    pub access_level: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new entry.
///
/// `referrer_id` must already be resolved from a referral code; position
/// and referral code are assigned store-side.
#[derive(Debug, Clone)]
pub struct CreateWaitlistEntry {
    pub name: String,
    pub email: String,
    pub university: String,
    pub phone: Option<String>,
    pub referrer_id: Option<DbId>,
}

/// One leaderboard row: the public subset of an entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub id: DbId,
    pub name: String,
    pub university: String,
    pub referral_count: i32,
    pub position: i64,
}

/// Aggregate counters over the whole ledger, for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitlistStats {
    pub total_signups: i64,
    pub total_referrals: i64,
    pub waiting_count: i64,
    pub invited_count: i64,
    pub joined_count: i64,
}
