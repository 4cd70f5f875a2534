//! Domain model (ids, message records, errors).

pub mod errors;
pub mod ids;
pub mod message;

pub use errors::{CourierError, ValidationError};
pub use ids::MessageId;
pub use message::{MessageDraft, MessageRecord, MessageStatus, MAX_TEXT_LEN};
