//! In-Memory Session Store
//!
//! Keeps sessions, turns and feedback in one map guarded by a single lock,
//! so every write observes and updates a consistent snapshot. Used by tests
//! and by local runs without a database.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::Feedback;
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::domain::session::{Message, NewMessage, TrainingSession};
use crate::ports::{SessionStore, SessionSummary};

/// Store operations that can be made to fail in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Create,
    Read,
    AppendMessage,
    IncrementHints,
    Complete,
}

#[derive(Debug, Clone)]
struct Entry {
    session: TrainingSession,
    messages: Vec<Message>,
    feedback: Option<Feedback>,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<SessionId, Entry>,
    /// Global so sequences are strictly increasing within every session.
    next_sequence: i64,
    failing: HashSet<StoreOperation>,
}

impl State {
    fn check(&self, op: StoreOperation) -> Result<(), DomainError> {
        if self.failing.contains(&op) {
            Err(DomainError::database(format!("injected failure: {:?}", op)))
        } else {
            Ok(())
        }
    }

    fn open_entry(&mut self, id: &SessionId) -> Result<&mut Entry, DomainError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| DomainError::session_not_found(id))?;
        if entry.session.is_completed() {
            return Err(DomainError::session_completed(id));
        }
        Ok(entry)
    }
}

fn with_progress(session: &TrainingSession, hints_used: u32, completed_at: Option<Timestamp>) -> TrainingSession {
    TrainingSession::reconstitute(
        *session.id(),
        session.owner().clone(),
        session.config().clone(),
        hints_used,
        *session.created_at(),
        completed_at,
    )
}

/// In-memory storage for training sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    state: Arc<RwLock<State>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call of `op` fail with a database error.
    pub async fn fail_on(&self, op: StoreOperation) {
        self.state.write().await.failing.insert(op);
    }

    pub async fn clear_failures(&self) {
        self.state.write().await.failing.clear();
    }

    /// Number of stored feedback records across all sessions.
    pub async fn feedback_count(&self) -> usize {
        self.state
            .read()
            .await
            .entries
            .values()
            .filter(|e| e.feedback.is_some())
            .count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &TrainingSession) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.check(StoreOperation::Create)?;
        state.entries.insert(
            *session.id(),
            Entry {
                session: session.clone(),
                messages: Vec::new(),
                feedback: None,
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<TrainingSession>, DomainError> {
        let state = self.state.read().await;
        state.check(StoreOperation::Read)?;
        Ok(state.entries.get(id).map(|e| e.session.clone()))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<SessionSummary>, DomainError> {
        let state = self.state.read().await;
        state.check(StoreOperation::Read)?;

        let mut summaries: Vec<SessionSummary> = state
            .entries
            .values()
            .filter(|e| e.session.owner() == owner)
            .map(|e| SessionSummary {
                session: e.session.clone(),
                message_count: e.messages.len() as u32,
                overall_score: e.feedback.as_ref().map(Feedback::overall_score),
            })
            .collect();
        summaries.sort_by(|a, b| b.session.created_at().cmp(a.session.created_at()));
        Ok(summaries)
    }

    async fn append_message(
        &self,
        session_id: &SessionId,
        message: NewMessage,
    ) -> Result<Message, DomainError> {
        let mut state = self.state.write().await;
        state.check(StoreOperation::AppendMessage)?;

        state.next_sequence += 1;
        let sequence = state.next_sequence;
        let entry = state.open_entry(session_id)?;
        let stored = Message::from_new(*session_id, message, sequence);
        entry.messages.push(stored.clone());
        Ok(stored)
    }

    async fn messages(&self, session_id: &SessionId) -> Result<Vec<Message>, DomainError> {
        let state = self.state.read().await;
        state.check(StoreOperation::Read)?;
        Ok(state
            .entries
            .get(session_id)
            .map(|e| e.messages.clone())
            .unwrap_or_default())
    }

    async fn increment_hints_used(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        let mut state = self.state.write().await;
        state.check(StoreOperation::IncrementHints)?;

        let entry = state.open_entry(session_id)?;
        let hints_used = entry.session.hints_used() + 1;
        entry.session = with_progress(&entry.session, hints_used, None);
        Ok(hints_used)
    }

    async fn find_feedback(&self, session_id: &SessionId) -> Result<Option<Feedback>, DomainError> {
        let state = self.state.read().await;
        state.check(StoreOperation::Read)?;
        Ok(state.entries.get(session_id).and_then(|e| e.feedback.clone()))
    }

    async fn complete_with_feedback(&self, feedback: &Feedback) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.check(StoreOperation::Complete)?;

        let entry = state.open_entry(&feedback.session_id)?;
        if entry.feedback.is_some() {
            return Err(DomainError::feedback_exists(&feedback.session_id));
        }
        entry.feedback = Some(feedback.clone());
        entry.session = with_progress(&entry.session, entry.session.hints_used(), Some(Timestamp::now()));
        Ok(())
    }
}
