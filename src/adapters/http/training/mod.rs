//! HTTP adapter for training session endpoints.

mod dto;
mod handlers;
mod routes;
mod streaming;

pub use dto::{
    ChatRequest, CompleteSessionResponse, CreateSessionRequest, CreateSessionResponse,
    ErrorResponse, HintRequest, HintResponse, MessageResponse, SessionListResponse,
    SessionResponse, SessionSummaryResponse,
};
pub use handlers::{handle_training_error, TrainingHandlers};
pub use routes::training_routes;
pub use streaming::{chat_event_stream, chat_sse, event_payload};
