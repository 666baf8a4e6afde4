//! Session store port.
//!
//! Persistence contract for training sessions, their dialogue turns and the
//! single feedback record. Ordering keys and the hint counter are owned by
//! the store so concurrent requests on one session stay consistent without a
//! session-level lock.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::assessment::Feedback;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::{Message, NewMessage, TrainingSession};

/// List entry for a caller's sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session: TrainingSession,
    pub message_count: u32,
    /// Present once the session has been assessed.
    pub overall_score: Option<u8>,
}

/// Store for training sessions.
///
/// # Contract
///
/// - `append_message` assigns a sequence strictly greater than every earlier
///   turn in the same session
/// - `increment_hints_used` is a single atomic delta, never read-then-write
/// - `complete_with_feedback` stores the feedback and closes the session as
///   one atomic write, so feedback never exists on an open session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &TrainingSession) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<TrainingSession>, DomainError>;

    /// The owner's sessions, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<SessionSummary>, DomainError>;

    /// Appends one turn and returns it with its assigned sequence.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `SessionCompleted` if the session is terminal
    /// - `DatabaseError` on persistence failure
    async fn append_message(
        &self,
        session_id: &SessionId,
        message: NewMessage,
    ) -> Result<Message, DomainError>;

    /// All turns of a session in sequence order.
    async fn messages(&self, session_id: &SessionId) -> Result<Vec<Message>, DomainError>;

    /// Adds one to the hint counter and returns the new value.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `SessionCompleted` if the session is terminal
    async fn increment_hints_used(&self, session_id: &SessionId) -> Result<u32, DomainError>;

    async fn find_feedback(&self, session_id: &SessionId) -> Result<Option<Feedback>, DomainError>;

    /// Stores the assessment result and sets `completed_at` to now.
    ///
    /// Either both changes are visible afterwards or neither is.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `SessionCompleted` if the session is terminal
    /// - `FeedbackExists` if feedback was already stored
    /// - `DatabaseError` on persistence failure
    async fn complete_with_feedback(&self, feedback: &Feedback) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }
}
