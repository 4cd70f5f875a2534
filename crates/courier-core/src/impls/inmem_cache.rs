//! In-memory intake cache.
//!
//! Stand-in for an external key/value cache: keys are message ids,
//! values are ISO-8601 intake timestamps, no expiry. Nothing in the
//! core reads these back.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{CourierError, MessageId};
use crate::ports::IntakeCache;

/// In-memory implementation of the IntakeCache port.
#[derive(Debug, Default)]
pub struct InMemoryIntakeCache {
    entries: Mutex<HashMap<MessageId, String>>,
}

impl InMemoryIntakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored timestamp (observability and tests only; the
    /// core never reads the cache).
    pub fn get(&self, id: MessageId) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
    }
}

#[async_trait]
impl IntakeCache for InMemoryIntakeCache {
    async fn record_intake(
        &self,
        id: MessageId,
        accepted_at: DateTime<Utc>,
    ) -> Result<(), CourierError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(id, accepted_at.to_rfc3339_opts(SecondsFormat::Secs, true));
        Ok(())
    }
}

/// Cache that records nothing, for deployments without a cache backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIntakeCache;

#[async_trait]
impl IntakeCache for NoopIntakeCache {
    async fn record_intake(
        &self,
        _id: MessageId,
        _accepted_at: DateTime<Utc>,
    ) -> Result<(), CourierError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    #[tokio::test]
    async fn record_intake_stores_iso8601() {
        let cache = InMemoryIntakeCache::new();
        let id = MessageId::from_ulid(Ulid::new());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        cache.record_intake(id, at).await.unwrap();

        assert_eq!(cache.get(id), Some("2024-01-01T12:00:00Z".to_string()));
    }

    #[tokio::test]
    async fn unknown_id_has_no_entry() {
        let cache = InMemoryIntakeCache::new();
        assert_eq!(cache.get(MessageId::from_ulid(Ulid::new())), None);
    }
}
