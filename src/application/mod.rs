//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the session store, query handlers only read.

pub mod handlers;

pub use handlers::{
    ChatEvent, CompleteSessionCommand, CompleteSessionHandler, CompletionOutcome,
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, GetSessionHandler,
    GetSessionQuery, HintResult, ListSessionsHandler, ListSessionsQuery, RequestHintCommand,
    RequestHintHandler, SendMessageCommand, SendMessageHandler, SessionView, TrainingLimits,
};
