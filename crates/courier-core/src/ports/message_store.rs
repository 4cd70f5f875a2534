//! MessageStore port - the source of truth for message state.
//!
//! Design principles:
//! - `create` is durable before it returns; a caller may assume the
//!   record survives a crash immediately after success.
//! - `claim_pending` is read-only; claiming does not transition state.
//! - `mark_sent` is a single conditional update ("set Sent where still
//!   Pending"), so two concurrent callers can never both transition
//!   the same record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CourierError, MessageDraft, MessageId, MessageRecord};

/// Result of a `mark_sent` call on an existing record.
///
/// `AlreadySent` is a success: re-marking a terminal record is a
/// no-op, not an error, and leaves `sent_at` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkSent {
    Marked,
    AlreadySent,
}

/// Per-status record tallies for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub pending: usize,
    pub sent: usize,
}

/// Store port. The in-memory implementation lives in `store::memory`;
/// this trait is the seam for swapping in a durable backend later.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new `Pending` record and return it with its generated id.
    async fn create(&self, draft: MessageDraft) -> Result<MessageRecord, CourierError>;

    /// Up to `limit` `Pending` records, oldest first. Creation order
    /// keeps dispatch fair and prevents starvation of early requests.
    async fn claim_pending(&self, limit: usize) -> Result<Vec<MessageRecord>, CourierError>;

    /// Conditionally transition `Pending -> Sent`, stamping `sent_at`
    /// from the store clock. Unknown ids yield `CourierError::NotFound`.
    async fn mark_sent(&self, id: MessageId) -> Result<MarkSent, CourierError>;

    /// All `Sent` records, creation order.
    async fn list_sent(&self) -> Result<Vec<MessageRecord>, CourierError>;

    async fn counts(&self) -> Result<StoreCounts, CourierError>;
}
