//! In-memory message store.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CourierError, MessageDraft, MessageId, MessageRecord, MessageStatus};
use crate::ports::{Clock, IdGenerator, MarkSent, MessageStore, StoreCounts, SystemClock, UlidGenerator};

/// In-memory store state.
struct StoreState {
    /// All records (single source of truth).
    records: HashMap<MessageId, MessageRecord>,

    /// Pending ids in creation order. `claim_pending` reads from the
    /// front; `mark_sent` removes the id on transition.
    pending: VecDeque<MessageId>,

    /// Every id ever created, in creation order. ULIDs generated in
    /// the same millisecond do not sort reliably, so listing follows
    /// this log rather than id order.
    order: Vec<MessageId>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            pending: VecDeque::new(),
            order: Vec::new(),
        }
    }

    fn counts(&self) -> StoreCounts {
        let mut counts = StoreCounts::default();
        for record in self.records.values() {
            match record.status {
                MessageStatus::Pending => counts.pending += 1,
                MessageStatus::Sent => counts.sent += 1,
            }
        }
        counts
    }
}

/// In-memory implementation of the MessageStore port.
///
/// One mutex guards the whole state, so the conditional transition in
/// `mark_sent` (check status, stamp `sent_at`, drop from the pending
/// queue) is atomic with respect to concurrent claims and intakes.
pub struct InMemoryMessageStore {
    state: Arc<Mutex<StoreState>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(SystemClock),
            Arc::new(UlidGenerator::new(SystemClock)),
        )
    }

    /// Construct with explicit clock and id generator (tests pin time
    /// with `FixedClock`).
    pub fn with_parts(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new())),
            clock,
            ids,
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn create(&self, draft: MessageDraft) -> Result<MessageRecord, CourierError> {
        let mut state = self.state.lock().await;

        let id = self.ids.next_message_id();
        let record = MessageRecord::new(id, draft, self.clock.now());

        state.records.insert(id, record.clone());
        state.pending.push_back(id);
        state.order.push(id);

        Ok(record)
    }

    async fn claim_pending(&self, limit: usize) -> Result<Vec<MessageRecord>, CourierError> {
        let state = self.state.lock().await;

        let batch = state
            .pending
            .iter()
            .filter_map(|id| state.records.get(id))
            .filter(|record| record.status.is_claimable())
            .take(limit)
            .cloned()
            .collect();

        Ok(batch)
    }

    async fn mark_sent(&self, id: MessageId) -> Result<MarkSent, CourierError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        let Some(record) = state.records.get_mut(&id) else {
            return Err(CourierError::NotFound(id));
        };

        if !record.mark_sent(now) {
            return Ok(MarkSent::AlreadySent);
        }

        state.pending.retain(|pending_id| *pending_id != id);
        Ok(MarkSent::Marked)
    }

    async fn list_sent(&self) -> Result<Vec<MessageRecord>, CourierError> {
        let state = self.state.lock().await;

        let sent = state
            .order
            .iter()
            .filter_map(|id| state.records.get(id))
            .filter(|record| record.status == MessageStatus::Sent)
            .cloned()
            .collect();

        Ok(sent)
    }

    async fn counts(&self) -> Result<StoreCounts, CourierError> {
        let state = self.state.lock().await;
        Ok(state.counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    fn store() -> InMemoryMessageStore {
        InMemoryMessageStore::new()
    }

    fn draft(content: &str) -> MessageDraft {
        MessageDraft::new(content, "+905551111111").unwrap()
    }

    #[tokio::test]
    async fn create_persists_a_pending_record() {
        let store = store();

        let record = store.create(draft("hello")).await.unwrap();

        assert_eq!(record.status, MessageStatus::Pending);
        assert_eq!(record.sent_at, None);

        let counts = store.counts().await.unwrap();
        assert_eq!(counts, StoreCounts { pending: 1, sent: 0 });
    }

    #[tokio::test]
    async fn claim_returns_oldest_first_and_respects_limit() {
        let store = store();

        let a = store.create(draft("a")).await.unwrap();
        let b = store.create(draft("b")).await.unwrap();
        let c = store.create(draft("c")).await.unwrap();

        let batch = store.claim_pending(2).await.unwrap();
        let ids: Vec<MessageId> = batch.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        // Claiming does not transition anything; the full set is still there.
        let again = store.claim_pending(10).await.unwrap();
        assert_eq!(again.len(), 3);
        assert_eq!(again[2].id, c.id);
    }

    #[tokio::test]
    async fn claim_never_returns_sent_records() {
        let store = store();

        let a = store.create(draft("a")).await.unwrap();
        let b = store.create(draft("b")).await.unwrap();
        store.mark_sent(a.id).await.unwrap();

        let batch = store.claim_pending(10).await.unwrap();
        let ids: Vec<MessageId> = batch.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[tokio::test]
    async fn mark_sent_stamps_sent_at_once() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(fixed_time));
        let store = InMemoryMessageStore::with_parts(
            clock,
            Arc::new(UlidGenerator::new(SystemClock)),
        );

        let record = store.create(draft("hello")).await.unwrap();

        assert_eq!(store.mark_sent(record.id).await.unwrap(), MarkSent::Marked);
        let sent = store.list_sent().await.unwrap();
        assert_eq!(sent[0].sent_at, Some(fixed_time));

        // Second call succeeds without touching the timestamp.
        assert_eq!(
            store.mark_sent(record.id).await.unwrap(),
            MarkSent::AlreadySent
        );
        let sent = store.list_sent().await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].sent_at, Some(fixed_time));
    }

    #[tokio::test]
    async fn mark_sent_on_unknown_id_is_not_found() {
        let store = store();
        let unknown = MessageId::from_ulid(ulid::Ulid::new());

        let err = store.mark_sent(unknown).await.unwrap_err();
        assert!(matches!(err, CourierError::NotFound(id) if id == unknown));
    }

    #[tokio::test]
    async fn concurrent_mark_sent_transitions_exactly_once() {
        let store = Arc::new(store());
        let record = store.create(draft("hello")).await.unwrap();

        let mut joins = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let id = record.id;
            joins.push(tokio::spawn(async move { store.mark_sent(id).await }));
        }

        let mut marked = 0;
        for join in joins {
            if join.await.unwrap().unwrap() == MarkSent::Marked {
                marked += 1;
            }
        }
        assert_eq!(marked, 1);
    }

    #[tokio::test]
    async fn concurrent_creates_yield_distinct_ids() {
        let store = Arc::new(store());

        let mut joins = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            joins.push(tokio::spawn(async move {
                store.create(draft(&format!("message {i}"))).await
            }));
        }

        let mut ids = Vec::new();
        for join in joins {
            ids.push(join.await.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);

        let counts = store.counts().await.unwrap();
        assert_eq!(counts.pending, 16);
    }

    #[tokio::test]
    async fn list_sent_is_in_creation_order() {
        let store = store();

        let a = store.create(draft("a")).await.unwrap();
        let b = store.create(draft("b")).await.unwrap();

        // Mark out of order; listing still follows creation order.
        store.mark_sent(b.id).await.unwrap();
        store.mark_sent(a.id).await.unwrap();

        let sent = store.list_sent().await.unwrap();
        let ids: Vec<MessageId> = sent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
