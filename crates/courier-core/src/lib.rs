//! courier-core
//!
//! Core building blocks for the Courier dispatch service.
//!
//! # Module layout
//! - **domain**: domain model (ids, message record, status, errors)
//! - **ports**: abstraction layer (MessageStore, IntakeCache, Clock, IdGenerator)
//! - **store**: store implementations (in-memory for now)
//! - **impls**: auxiliary implementations (intake cache adapters)
//! - **app**: application logic (RunController, IntakeService, Dispatcher)

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod store;

pub use app::{DispatchConfig, Dispatcher, IntakeService, RunController, StartOutcome, StopOutcome};
pub use domain::{CourierError, MessageDraft, MessageId, MessageRecord, MessageStatus, ValidationError};
pub use ports::{Clock, IdGenerator, IntakeCache, MarkSent, MessageStore, StoreCounts};
pub use store::InMemoryMessageStore;
