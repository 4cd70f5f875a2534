//! Message record: validated input + lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::ids::MessageId;

/// Upper bound for `content` and `recipient`, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// Message lifecycle status.
///
/// Transitions are one-directional: `Pending -> Sent`, nothing else.
/// `Sent` means the dispatch loop processed the record; it does not
/// imply delivery to a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Accepted but not yet dispatched.
    Pending,

    /// Processed by the dispatch loop (terminal).
    Sent,
}

impl MessageStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MessageStatus::Sent)
    }

    /// Is this record eligible for a dispatch claim?
    pub fn is_claimable(self) -> bool {
        matches!(self, MessageStatus::Pending)
    }
}

/// Validated intake payload. Constructing a draft is the only way
/// input reaches the store, so the length and non-empty bounds hold
/// for every persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    content: String,
    recipient: String,
}

impl MessageDraft {
    pub fn new(
        content: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        let recipient = recipient.into();
        validate_text("content", &content)?;
        validate_text("to", &recipient)?;
        Ok(Self { content, recipient })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong(field));
    }
    Ok(())
}

/// A message request and its lifecycle state.
///
/// Design:
/// - This is the single source of truth for message state.
/// - The pending queue holds MessageId only.
/// - All state transitions happen here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: MessageId,
    pub content: String,
    pub recipient: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,

    /// Unset while `Pending`, stamped exactly once on the transition
    /// to `Sent`.
    pub sent_at: Option<DateTime<Utc>>,
}

impl MessageRecord {
    pub fn new(id: MessageId, draft: MessageDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: draft.content,
            recipient: draft.recipient,
            status: MessageStatus::Pending,
            created_at,
            sent_at: None,
        }
    }

    /// Apply the `Pending -> Sent` transition. Returns `true` if the
    /// record transitioned, `false` if it was already `Sent` (in which
    /// case `sent_at` is left untouched).
    pub fn mark_sent(&mut self, now: DateTime<Utc>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = MessageStatus::Sent;
        self.sent_at = Some(now);
        true
    }
}
