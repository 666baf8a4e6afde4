//! HTTP routes for training session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    chat, complete_session, create_session, get_session, list_sessions, request_hint,
    TrainingHandlers,
};

/// Creates the training router; mount it under `/api/sessions`.
pub fn training_routes(handlers: TrainingHandlers) -> Router {
    Router::new()
        .route("/", post(create_session).get(list_sessions))
        .route("/:id", get(get_session))
        .route("/:id/chat", post(chat))
        .route("/:id/hint", post(request_hint))
        .route("/:id/complete", post(complete_session))
        .with_state(handlers)
}
