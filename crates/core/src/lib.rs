//! Domain types and logic for the UniGo waitlist ledger.
//!
//! This crate is I/O-free: persistence lives in `unigo-db`, the HTTP
//! surface in `unigo-api`.

pub mod error;
pub mod referral;
pub mod types;
pub mod waitlist;
