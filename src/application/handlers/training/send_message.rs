//! SendMessageHandler - one dialogue turn with a streamed company reply.
//!
//! The auditor turn is stored before generation starts. The reply is
//! forwarded chunk by chunk while it is generated and is stored only after
//! the upstream stream delivers its final chunk, so a failed or truncated
//! reply never becomes part of the transcript.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::dialogue::{compose_directive, TurnContext};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{auditor_message_count, NewMessage, TrainingError};
use crate::ports::{
    AIProvider, CompletionRequest, CompletionStream, RequestMetadata, RequestPurpose, SessionStore,
};

use super::{load_owned_session, TrainingLimits};

/// Generic notice sent to the client when a reply cannot be completed.
pub const CHAT_FAILURE_NOTICE: &str = "Ett fel uppstod";

/// Command to send an auditor message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub content: String,
}

/// Events delivered to the client while a reply is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Next slice of reply text.
    Text(String),
    /// The reply was generated and stored.
    Done,
    /// Generation or storage failed; nothing was stored for the reply.
    Error(String),
}

/// Handler for dialogue turns.
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    ai_provider: Arc<dyn AIProvider>,
    limits: TrainingLimits,
}

impl SendMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        ai_provider: Arc<dyn AIProvider>,
        limits: TrainingLimits,
    ) -> Self {
        Self {
            store,
            ai_provider,
            limits,
        }
    }

    /// Stores the auditor turn and starts the reply.
    ///
    /// Returns as soon as the upstream stream is open; reply events arrive
    /// on the receiver and end with exactly one `Done` or `Error`.
    ///
    /// # Errors
    ///
    /// - `NotFound`, `Forbidden` for unknown or foreign sessions
    /// - `InvalidState` if the session is completed
    /// - `ValidationFailed` if the content is blank
    /// - `RateLimited` once the auditor turn cap is reached
    /// - `UpstreamGenerationFailed` if the reply cannot be started
    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<mpsc::Receiver<ChatEvent>, TrainingError> {
        // 1. Load and guard the session
        let session =
            load_owned_session(self.store.as_ref(), &cmd.session_id, &cmd.user_id).await?;
        session.ensure_open()?;
        let message = NewMessage::auditor(&cmd.content)?;

        // 2. Enforce the auditor turn cap
        let mut history = self.store.messages(&cmd.session_id).await?;
        let limit = self.limits.max_auditor_messages;
        if auditor_message_count(&history) >= limit as usize {
            info!(session_id = %cmd.session_id, limit, "Auditor message limit reached");
            return Err(TrainingError::rate_limited(limit));
        }

        // 3. Store the auditor turn
        let stored = self.store.append_message(&cmd.session_id, message).await?;
        let current = stored.content.clone();
        history.push(stored);

        // 4. Compose directive and open the reply stream
        let turn = TurnContext::for_turn(&history, &current);
        let directive = compose_directive(session.config(), &turn);
        debug!(
            session_id = %cmd.session_id,
            phase = ?turn.phase,
            directive_tokens = self.ai_provider.estimate_tokens(&directive),
            "Composed chat directive"
        );

        let request = CompletionRequest::new(RequestMetadata::traced(
            cmd.user_id,
            cmd.session_id,
            RequestPurpose::Chat,
        ))
        .with_system_prompt(directive)
        .with_transcript(&history)
        .with_max_tokens(self.limits.chat_max_tokens);

        let stream = self.ai_provider.stream_complete(request).await.map_err(|e| {
            error!(session_id = %cmd.session_id, error = %e, "Failed to start reply stream");
            TrainingError::upstream(e.to_string())
        })?;

        // 5. Relay in the background
        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(relay_reply(
            stream,
            tx,
            Arc::clone(&self.store),
            cmd.session_id,
        ));

        Ok(rx)
    }
}

/// Forwards reply chunks and stores the full reply once the stream ends.
///
/// Keeps consuming after the client has gone away so a finished reply is
/// still stored.
async fn relay_reply(
    mut stream: CompletionStream,
    tx: mpsc::Sender<ChatEvent>,
    store: Arc<dyn SessionStore>,
    session_id: SessionId,
) {
    let mut reply = String::new();
    let mut finished = false;

    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                let is_final = chunk.is_final();
                if !chunk.delta.is_empty() {
                    reply.push_str(&chunk.delta);
                    let _ = tx.send(ChatEvent::Text(chunk.delta)).await;
                }
                if is_final {
                    finished = true;
                    break;
                }
            }
            Err(e) => {
                error!(
                    session_id = %session_id,
                    error = %e,
                    partial_len = reply.len(),
                    "Reply stream failed, discarding partial reply"
                );
                let _ = tx.send(ChatEvent::Error(CHAT_FAILURE_NOTICE.to_string())).await;
                return;
            }
        }
    }

    if !finished {
        error!(
            session_id = %session_id,
            partial_len = reply.len(),
            "Reply stream closed before completion, discarding partial reply"
        );
        let _ = tx.send(ChatEvent::Error(CHAT_FAILURE_NOTICE.to_string())).await;
        return;
    }

    let message = match NewMessage::company(&reply) {
        Ok(message) => message,
        Err(_) => {
            warn!(session_id = %session_id, "Reply stream ended without content");
            let _ = tx.send(ChatEvent::Error(CHAT_FAILURE_NOTICE.to_string())).await;
            return;
        }
    };

    match store.append_message(&session_id, message).await {
        Ok(_) => {
            let _ = tx.send(ChatEvent::Done).await;
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Failed to store company reply");
            let _ = tx.send(ChatEvent::Error(CHAT_FAILURE_NOTICE.to_string())).await;
        }
    }
}
