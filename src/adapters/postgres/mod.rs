//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSessionStore` - sessions, turns, hint counter and feedback

mod session_store;

pub use session_store::{PostgresSessionStore, MIGRATOR};
