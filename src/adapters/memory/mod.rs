//! In-memory adapters for tests and database-less runs.

mod session_store;

pub use session_store::{InMemorySessionStore, StoreOperation};
