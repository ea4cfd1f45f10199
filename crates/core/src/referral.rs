//! Referral link construction.
//!
//! The link format is the one bit-exact external contract of the ledger:
//! `<public URL>/waitlist?ref=<referral_code>`. The referral code itself is
//! an opaque unique token generated by the store.

/// Build the shareable referral link for an entry's referral code.
pub fn referral_link(public_url: &str, referral_code: &str) -> String {
    format!(
        "{}/waitlist?ref={}",
        public_url.trim_end_matches('/'),
        referral_code
    )
}
