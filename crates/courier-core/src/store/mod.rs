//! Store module: in-memory implementation of the MessageStore port.

mod memory;

pub use memory::InMemoryMessageStore;
