//! Training session command and query handlers.
//!
//! One handler per use case. Each holds its ports as `Arc<dyn ...>` and
//! exposes a single `handle` method returning `TrainingError` on failure.

mod complete_session;
mod create_session;
mod get_session;
mod list_sessions;
mod request_hint;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use complete_session::{
    CompleteSessionCommand, CompleteSessionHandler, CompletionOutcome, MIN_MESSAGES_FOR_ASSESSMENT,
};
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery, SessionView};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery};
pub use request_hint::{HintResult, RequestHintCommand, RequestHintHandler};
pub use send_message::{ChatEvent, SendMessageCommand, SendMessageHandler, CHAT_FAILURE_NOTICE};

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{TrainingError, TrainingSession};
use crate::ports::SessionStore;

/// Tunables shared by the dialogue and assessment handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingLimits {
    /// Auditor turns allowed per session.
    pub max_auditor_messages: u32,
    pub chat_max_tokens: u32,
    pub hint_max_tokens: u32,
    pub assessment_max_tokens: u32,
    pub best_practice_max_tokens: u32,
}

impl Default for TrainingLimits {
    fn default() -> Self {
        Self {
            max_auditor_messages: 50,
            chat_max_tokens: 1024,
            hint_max_tokens: 1024,
            assessment_max_tokens: 2048,
            best_practice_max_tokens: 2048,
        }
    }
}

/// Loads a session and checks that `user_id` owns it.
async fn load_owned_session(
    store: &dyn SessionStore,
    session_id: &SessionId,
    user_id: &UserId,
) -> Result<TrainingSession, TrainingError> {
    let session = store
        .find_by_id(session_id)
        .await?
        .ok_or_else(|| TrainingError::not_found(session_id))?;
    session.authorize(user_id)?;
    Ok(session)
}
