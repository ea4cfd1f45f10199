use crate::types::DbId;

/// Domain-level error taxonomy for the waitlist ledger.
///
/// `DuplicateSignup` and `NotOnWaitlist` are expected, user-facing
/// conditions and must stay distinguishable from generic failures: the
/// caller offers a different flow for each (re-use of an email vs. an
/// invitation to join).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("This email is already on the waitlist")]
    DuplicateSignup,

    #[error("This email is not on the waitlist")]
    NotOnWaitlist,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
