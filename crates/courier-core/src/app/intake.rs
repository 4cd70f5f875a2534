//! IntakeService - validate and accept a new message request.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{CourierError, MessageDraft, MessageRecord};
use crate::ports::{IntakeCache, MessageStore};

/// Accepts message requests: validation happens in `MessageDraft`,
/// persistence is delegated to the store, and the intake timestamp is
/// mirrored to the cache on a best-effort basis.
pub struct IntakeService {
    store: Arc<dyn MessageStore>,
    cache: Arc<dyn IntakeCache>,
}

impl IntakeService {
    pub fn new(store: Arc<dyn MessageStore>, cache: Arc<dyn IntakeCache>) -> Self {
        Self { store, cache }
    }

    /// Validate and persist a new message request.
    ///
    /// The cache write is a non-critical side channel: its failure is
    /// logged and the intake still succeeds. The store write is the
    /// one that matters.
    pub async fn submit(
        &self,
        content: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<MessageRecord, CourierError> {
        let draft = MessageDraft::new(content, recipient)?;
        let record = self.store.create(draft).await?;

        if let Err(error) = self
            .cache
            .record_intake(record.id, record.created_at)
            .await
        {
            warn!(id = %record.id, %error, "intake cache write failed; continuing");
        }

        Ok(record)
    }
}
