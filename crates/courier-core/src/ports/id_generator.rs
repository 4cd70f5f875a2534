//! IdGenerator port - message id generation.
//!
//! ULID-based: the timestamp component comes from the injected
//! [`Clock`], so a `FixedClock` yields deterministic timestamp bits
//! in tests while the random component keeps ids unique.

use ulid::Ulid;

use crate::domain::MessageId;
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn next_message_id(&self) -> MessageId;
}

/// ULID-based id generator.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn next_message_id(&self) -> MessageId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        MessageId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
