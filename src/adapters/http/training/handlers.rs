//! HTTP handlers for training session endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    CompleteSessionCommand, CompleteSessionHandler, CreateSessionCommand, CreateSessionHandler,
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, ListSessionsQuery,
    RequestHintCommand, RequestHintHandler, SendMessageCommand, SendMessageHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::TrainingError;

use super::dto::{
    ChatRequest, CompleteSessionResponse, CreateSessionRequest, CreateSessionResponse,
    ErrorResponse, HintRequest, HintResponse, SessionListResponse, SessionResponse,
};
use super::streaming::chat_sse;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TrainingHandlers {
    create_handler: Arc<CreateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    list_handler: Arc<ListSessionsHandler>,
    chat_handler: Arc<SendMessageHandler>,
    hint_handler: Arc<RequestHintHandler>,
    complete_handler: Arc<CompleteSessionHandler>,
}

impl TrainingHandlers {
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        list_handler: Arc<ListSessionsHandler>,
        chat_handler: Arc<SendMessageHandler>,
        hint_handler: Arc<RequestHintHandler>,
        complete_handler: Arc<CompleteSessionHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            chat_handler,
            hint_handler,
            complete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a new training session
pub async fn create_session(
    State(handlers): State<TrainingHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateSessionCommand {
        user_id: user.id,
        standards: req.standards.into_codes(),
        audit_type: req.audit_type,
        difficulty: req.difficulty,
        chapters: req.chapters,
        industry: req.industry,
        hints_enabled: req.hints_enabled,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response: CreateSessionResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_training_error(e),
    }
}

/// GET /api/sessions - List the caller's sessions
pub async fn list_sessions(
    State(handlers): State<TrainingHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list_handler
        .handle(ListSessionsQuery { user_id: user.id })
        .await
    {
        Ok(summaries) => {
            let response = SessionListResponse {
                sessions: summaries.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_training_error(e),
    }
}

/// GET /api/sessions/:id - Session with messages and feedback
pub async fn get_session(
    State(handlers): State<TrainingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSessionQuery {
        session_id,
        user_id: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_training_error(e),
    }
}

/// POST /api/sessions/:id/chat - Send a message, stream the reply
pub async fn chat(
    State(handlers): State<TrainingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let content = match payload {
        Ok(Json(req)) => req.into_content(),
        Err(rejection) => Err(TrainingError::validation("body", rejection.body_text())),
    };
    let content = match content {
        Ok(content) => content,
        Err(e) => return handle_training_error(e),
    };

    let cmd = SendMessageCommand {
        session_id,
        user_id: user.id,
        content,
    };

    match handlers.chat_handler.handle(cmd).await {
        Ok(rx) => chat_sse(rx).into_response(),
        Err(e) => handle_training_error(e),
    }
}

/// POST /api/sessions/:id/hint - Request a mentor hint
pub async fn request_hint(
    State(handlers): State<TrainingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let level = match HintRequest::from_body(&body).and_then(|req| req.level()) {
        Ok(level) => level,
        Err(e) => return handle_training_error(e),
    };

    let cmd = RequestHintCommand {
        session_id,
        user_id: user.id,
        level,
    };

    match handlers.hint_handler.handle(cmd).await {
        Ok(result) => {
            let response: HintResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_training_error(e),
    }
}

/// POST /api/sessions/:id/complete - Assess and close the session
pub async fn complete_session(
    State(handlers): State<TrainingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CompleteSessionCommand {
        session_id,
        user_id: user.id,
    };

    match handlers.complete_handler.handle(cmd).await {
        Ok(outcome) => {
            let response = CompleteSessionResponse {
                success: true,
                feedback: outcome.feedback,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_training_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_SESSION_ID", "Ogiltigt sessions-ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Maps a training error to a status code and error body.
///
/// Upstream and storage details are logged by the application layer and
/// never echoed to the client.
pub fn handle_training_error(error: TrainingError) -> Response {
    let code = error.code();
    let (status, body) = match error {
        TrainingError::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(code, "Ej autentiserad"),
        ),
        TrainingError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(code, "Session hittades inte"),
        ),
        TrainingError::Forbidden => (
            StatusCode::FORBIDDEN,
            ErrorResponse::new(code, "Ingen behörighet"),
        ),
        TrainingError::InvalidState(msg) => (StatusCode::CONFLICT, ErrorResponse::new(code, msg)),
        TrainingError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(code, format!("Validation failed for {}: {}", field, message)),
        ),
        TrainingError::RateLimited { limit } => (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorResponse::new(code, "Max antal meddelanden uppnått för denna session")
                .with_limit(limit),
        ),
        TrainingError::UpstreamGenerationFailed(_) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new(code, "Kunde inte generera svar, försök igen"),
        ),
        TrainingError::PersistenceFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(code, "Ett internt fel uppstod"),
        ),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_maps_to_401() {
        let response = handle_training_error(TrainingError::Unauthenticated);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_training_error(TrainingError::not_found(&SessionId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_training_error(TrainingError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn invalid_state_maps_to_409() {
        let response = handle_training_error(TrainingError::invalid_state("completed"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_failed_maps_to_400() {
        let response = handle_training_error(TrainingError::validation("content", "empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limited_maps_to_429() {
        let response = handle_training_error(TrainingError::rate_limited(50));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn upstream_maps_to_502() {
        let response = handle_training_error(TrainingError::upstream("boom"));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn persistence_maps_to_500() {
        let response = handle_training_error(TrainingError::persistence("db down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_session_id_is_400() {
        let response = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
