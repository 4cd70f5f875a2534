//! IntakeCache port - best-effort intake timestamp side channel.
//!
//! Write-only from the core's perspective: entries are keyed by
//! message id with an ISO-8601 intake timestamp and no expiry.
//! Callers log failures and carry on; a broken cache must never fail
//! an intake.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CourierError, MessageId};

#[async_trait]
pub trait IntakeCache: Send + Sync {
    async fn record_intake(
        &self,
        id: MessageId,
        accepted_at: DateTime<Utc>,
    ) -> Result<(), CourierError>;
}
