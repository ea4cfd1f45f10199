//! Store adapters.

pub mod waitlist_repo;

pub use waitlist_repo::PgWaitlistStore;
