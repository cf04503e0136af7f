//! Adapter implementations for access ports.

mod memory;

pub use memory::InMemorySessionStore;
