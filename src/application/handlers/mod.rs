//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod training;

pub use training::{
    // Commands and queries
    CompleteSessionCommand, CreateSessionCommand, GetSessionQuery, ListSessionsQuery,
    RequestHintCommand, SendMessageCommand,
    // Handlers
    CompleteSessionHandler, CreateSessionHandler, GetSessionHandler, ListSessionsHandler,
    RequestHintHandler, SendMessageHandler,
    // Results
    ChatEvent, CompletionOutcome, CreateSessionResult, HintResult, SessionView,
    // Settings
    TrainingLimits, CHAT_FAILURE_NOTICE,
};
