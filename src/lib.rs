//! Audit Trainer - simulated audit dialogues and post-session assessment.
//!
//! The crate is split along ports and adapters:
//!
//! - `domain` - session model, knowledge tables, phase detection, directive
//!   composition, hints and assessment parsing (no I/O)
//! - `ports` - traits for the generative service, the session store and token
//!   validation
//! - `adapters` - Anthropic and mock providers, Postgres and in-memory stores,
//!   JWT validation, the axum HTTP surface
//! - `application` - one handler per use case (create, read, chat, hint, complete)
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
