//! Ports - abstraction layer.
//!
//! Each trait hides an external collaborator (persistence backend,
//! cache, wall clock) so the application layer can be exercised with
//! in-memory or fixed implementations in tests.

pub mod clock;
pub mod id_generator;
pub mod intake_cache;
pub mod message_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::intake_cache::IntakeCache;
pub use self::message_store::{MarkSent, MessageStore, StoreCounts};
