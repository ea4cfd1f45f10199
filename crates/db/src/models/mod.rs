//! Row models and DTOs for the waitlist ledger.

pub mod waitlist_entry;
