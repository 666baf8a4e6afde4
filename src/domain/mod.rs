//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `session` - Training session aggregate, configuration and messages
//! - `knowledge` - Static reference content (chapters, industries, overlays)
//! - `dialogue` - Phase detection and directive composition for the chat
//! - `hints` - Hint levels, mentor directives and hint penalties
//! - `assessment` - Transcript rendering, feedback parsing and best practice

pub mod assessment;
pub mod dialogue;
pub mod foundation;
pub mod hints;
pub mod knowledge;
pub mod session;
