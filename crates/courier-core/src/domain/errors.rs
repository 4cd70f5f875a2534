//! Error taxonomy.
//!
//! - `Validation`: bad or missing input, surfaced to callers as 400.
//! - `Persistence`: store unreachable or a write failed; 500 on
//!   synchronous paths, logged-and-skipped in the dispatch loop.
//! - `NotFound`: `mark_sent` on an unknown id, non-fatal.

use thiserror::Error;

use super::ids::MessageId;
use super::message::MAX_TEXT_LEN;

/// Input validation failure. The field name is carried so callers can
/// produce a usable message without re-checking the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be at most {MAX_TEXT_LEN} characters")]
    TooLong(&'static str),
}

#[derive(Debug, Error)]
pub enum CourierError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("message {0} not found")]
    NotFound(MessageId),
}

impl CourierError {
    /// Is this a caller mistake (as opposed to a backend fault)?
    pub fn is_validation(&self) -> bool {
        matches!(self, CourierError::Validation(_))
    }
}
