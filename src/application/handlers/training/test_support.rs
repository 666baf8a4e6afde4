//! Shared fixtures for handler tests.

use crate::adapters::memory::InMemorySessionStore;
use crate::domain::assessment::{Assessment, Feedback};
use crate::domain::foundation::UserId;
use crate::domain::session::{
    AnnexChapter, AuditType, Difficulty, IndustryCode, NewMessage, SessionConfig, StandardCode,
    TrainingSession,
};
use crate::ports::SessionStore;

pub fn owner() -> UserId {
    UserId::new("auditor-1").unwrap()
}

pub fn stranger() -> UserId {
    UserId::new("someone-else").unwrap()
}

pub fn config(hints_enabled: bool) -> SessionConfig {
    SessionConfig::new(
        vec![StandardCode::Iso9001],
        AuditType::Certification,
        Difficulty::Medium,
        vec![AnnexChapter::new(7).unwrap(), AnnexChapter::new(8).unwrap()],
        IndustryCode::Manufacturing,
        hints_enabled,
    )
    .unwrap()
}

/// Stores a fresh session owned by [`owner`].
pub async fn seeded_session(store: &InMemorySessionStore, hints_enabled: bool) -> TrainingSession {
    let session = TrainingSession::new(owner(), config(hints_enabled));
    store.create(&session).await.unwrap();
    session
}

/// Appends alternating auditor/company turns, starting with the auditor.
pub async fn seed_turns(store: &InMemorySessionStore, session: &TrainingSession, turns: usize) {
    for i in 0..turns {
        let message = if i % 2 == 0 {
            NewMessage::auditor(&format!("Fråga {}", i / 2 + 1)).unwrap()
        } else {
            NewMessage::company(&format!("Svar {}", i / 2 + 1)).unwrap()
        };
        store.append_message(session.id(), message).await.unwrap();
    }
}

/// Closes the session with fallback feedback.
pub async fn close_session(store: &InMemorySessionStore, session: &TrainingSession) {
    let feedback = Feedback::new(*session.id(), Assessment::fallback(), None);
    store.complete_with_feedback(&feedback).await.unwrap();
}
