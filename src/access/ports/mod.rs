//! Port contracts for the access context.

pub mod session_store;

pub use session_store::{SessionStore, SessionStoreError, SessionStoreResult};
