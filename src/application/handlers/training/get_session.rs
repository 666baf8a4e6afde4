//! GetSessionHandler - Query handler for a single session view.

use std::sync::Arc;

use crate::domain::assessment::Feedback;
use crate::domain::dialogue::{detect_phase, Phase};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{Message, TrainingError, TrainingSession};
use crate::ports::SessionStore;

use super::load_owned_session;

/// Query for one session owned by the caller.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Everything a client needs to resume or review a session.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session: TrainingSession,
    /// Ordered by store sequence.
    pub messages: Vec<Message>,
    pub feedback: Option<Feedback>,
    pub phase: Phase,
}

/// Handler for reading a session.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, TrainingError> {
        let session = load_owned_session(self.store.as_ref(), &query.session_id, &query.user_id).await?;
        let messages = self.store.messages(&query.session_id).await?;
        let feedback = self.store.find_feedback(&query.session_id).await?;
        let phase = detect_phase(&messages);

        Ok(SessionView {
            session,
            messages,
            feedback,
            phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::application::handlers::training::test_support::{
        owner, seed_turns, seeded_session, stranger,
    };

    fn handler(store: &InMemorySessionStore) -> GetSessionHandler {
        GetSessionHandler::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn returns_ordered_messages_and_phase() {
        let store = InMemorySessionStore::new();
        let session = seeded_session(&store, true).await;
        seed_turns(&store, &session, 4).await;

        let view = handler(&store)
            .handle(GetSessionQuery {
                session_id: *session.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert_eq!(view.messages.len(), 4);
        assert!(view.messages.windows(2).all(|w| w[0].sequence < w[1].sequence));
        assert_eq!(view.phase, Phase::Opening);
        assert!(view.feedback.is_none());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let err = handler(&store)
            .handle(GetSessionQuery {
                session_id: SessionId::new(),
                user_id: owner(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TrainingError::NotFound(_)));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = InMemorySessionStore::new();
        let session = seeded_session(&store, true).await;
        let err = handler(&store)
            .handle(GetSessionQuery {
                session_id: *session.id(),
                user_id: stranger(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, TrainingError::Forbidden);
    }
}
