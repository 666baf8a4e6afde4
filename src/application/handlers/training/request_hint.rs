//! RequestHintHandler - Command handler for mentor hints.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::dialogue::detect_phase;
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::hints::{hint_directive, HintContext, HintLevel, MENTOR_SYSTEM_DIRECTIVE};
use crate::domain::session::TrainingError;
use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, RequestMetadata, RequestPurpose, SessionStore,
};

use super::{load_owned_session, TrainingLimits};

/// Command to request a hint at a given disclosure level.
#[derive(Debug, Clone)]
pub struct RequestHintCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintResult {
    pub hint: String,
    pub level: HintLevel,
    /// Counter value after this hint.
    pub hints_used: u32,
}

/// Handler for hint requests.
pub struct RequestHintHandler {
    store: Arc<dyn SessionStore>,
    ai_provider: Arc<dyn AIProvider>,
    limits: TrainingLimits,
}

impl RequestHintHandler {
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

    /// # Errors
    ///
    /// - `ValidationFailed` if the level is outside 1..=3
    /// - `InvalidState` if hints are disabled or the session is completed
    /// - `UpstreamGenerationFailed` if the mentor reply fails; the counter
    ///   is left unchanged
    pub async fn handle(&self, cmd: RequestHintCommand) -> Result<HintResult, TrainingError> {
        let level = HintLevel::new(cmd.level)?;
        let session =
            load_owned_session(self.store.as_ref(), &cmd.session_id, &cmd.user_id).await?;
        session.ensure_open()?;
        session.ensure_hints_enabled()?;

        let messages = self.store.messages(&cmd.session_id).await?;
        let context = HintContext {
            config: session.config(),
            phase: detect_phase(&messages),
            message_count: messages.len(),
        };

        let request = CompletionRequest::new(RequestMetadata::traced(
            cmd.user_id,
            cmd.session_id,
            RequestPurpose::Hint,
        ))
        .with_system_prompt(MENTOR_SYSTEM_DIRECTIVE)
        .with_transcript(&messages)
        .with_message(MessageRole::User, hint_directive(level, &context))
        .with_max_tokens(self.limits.hint_max_tokens);

        let response = self.ai_provider.complete(request).await.map_err(|e| {
            error!(session_id = %cmd.session_id, error = %e, "Hint generation failed");
            TrainingError::upstream(e.to_string())
        })?;

        let hints_used = self.store.increment_hints_used(&cmd.session_id).await?;
        info!(
            session_id = %cmd.session_id,
            level = level.number(),
            hints_used,
            "Hint issued"
        );

        Ok(HintResult {
            hint: response.content.trim().to_string(),
            level,
            hints_used,
        })
    }
}
