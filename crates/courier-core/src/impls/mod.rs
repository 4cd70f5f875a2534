//! Implementations of auxiliary ports.

mod inmem_cache;

pub use inmem_cache::{InMemoryIntakeCache, NoopIntakeCache};
