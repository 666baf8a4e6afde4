//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Anthropic streaming client and a scripted mock
//! - `auth` - JWT session validation and a mock validator
//! - `http` - axum routes, SSE streaming and auth middleware
//! - `memory` - in-process session store
//! - `postgres` - sqlx session store with embedded migrations

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider};
pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use memory::InMemorySessionStore;
pub use postgres::PostgresSessionStore;
