//! Request handlers for the waitlist ledger.
//!
//! Handlers delegate to the [`WaitlistStore`](unigo_db::WaitlistStore)
//! behind `AppState`, map errors via
//! [`AppError`](crate::error::AppError), and publish change events on the
//! bus.

pub mod admin;
pub mod waitlist;
