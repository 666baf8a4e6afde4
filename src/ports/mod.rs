//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - the generative-text service (streaming and single-shot)
//! - `SessionStore` - sessions, turns, hint counter and feedback
//! - `SessionValidator` - bearer token validation

mod ai_provider;
mod session_store;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    Message, MessageRole, ProviderInfo, RequestMetadata, RequestPurpose, StreamChunk, TokenUsage,
};
pub use session_store::{SessionStore, SessionSummary};
pub use session_validator::SessionValidator;
