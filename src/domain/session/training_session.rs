//! TrainingSession aggregate.
//!
//! One simulated audit engagement. Configuration is fixed at creation; the
//! only mutable state is the hint counter and the completion timestamp, both
//! of which are changed through the store (atomic increment, single
//! completion write) rather than by mutating a loaded copy.

use serde::{Deserialize, Serialize};

use super::{SessionConfig, TrainingError};
use crate::domain::foundation::{SessionId, Timestamp, UserId};

/// A simulated audit engagement owned by one auditor.
///
/// # Invariants
///
/// - `owner` never changes
/// - once `completed_at` is set the session is terminal: no messages, hints
///   or feedback may be added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    id: SessionId,
    owner: UserId,
    config: SessionConfig,
    hints_used: u32,
    created_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl TrainingSession {
    /// Starts a new open session.
    pub fn new(owner: UserId, config: SessionConfig) -> Self {
        Self {
            id: SessionId::new(),
            owner,
            config,
            hints_used: 0,
            created_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Rebuilds a session from storage without validation.
    pub fn reconstitute(
        id: SessionId,
        owner: UserId,
        config: SessionConfig,
        hints_used: u32,
        created_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            owner,
            config,
            hints_used,
            created_at,
            completed_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards
    // ─────────────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// - `Forbidden` if `user_id` is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), TrainingError> {
        if &self.owner == user_id {
            Ok(())
        } else {
            Err(TrainingError::forbidden())
        }
    }

    /// # Errors
    ///
    /// - `InvalidState` if the session is completed
    pub fn ensure_open(&self) -> Result<(), TrainingError> {
        if self.is_completed() {
            Err(TrainingError::invalid_state("session is already completed"))
        } else {
            Ok(())
        }
    }

    /// # Errors
    ///
    /// - `InvalidState` if hints were switched off at creation
    pub fn ensure_hints_enabled(&self) -> Result<(), TrainingError> {
        if self.config.hints_enabled() {
            Ok(())
        } else {
            Err(TrainingError::invalid_state("hints are disabled for this session"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{AnnexChapter, AuditType, Difficulty, IndustryCode, StandardCode};

    fn config(hints_enabled: bool) -> SessionConfig {
        SessionConfig::new(
            vec![StandardCode::Iso9001],
            AuditType::Internal,
            Difficulty::Medium,
            vec![AnnexChapter::new(8).unwrap()],
            IndustryCode::Manufacturing,
            hints_enabled,
        )
        .unwrap()
    }

    fn owner() -> UserId {
        UserId::new("auditor-1").unwrap()
    }

    #[test]
    fn new_session_is_open_with_no_hints() {
        let session = TrainingSession::new(owner(), config(true));
        assert!(!session.is_completed());
        assert_eq!(session.hints_used(), 0);
        assert!(session.ensure_open().is_ok());
    }

    #[test]
    fn authorize_rejects_other_users() {
        let session = TrainingSession::new(owner(), config(true));
        let other = UserId::new("someone-else").unwrap();
        assert_eq!(session.authorize(&other), Err(TrainingError::Forbidden));
        assert!(session.authorize(&owner()).is_ok());
    }

    #[test]
    fn completed_session_is_terminal() {
        let session = TrainingSession::reconstitute(
            SessionId::new(),
            owner(),
            config(true),
            2,
            Timestamp::now(),
            Some(Timestamp::now()),
        );
        assert!(matches!(session.ensure_open(), Err(TrainingError::InvalidState(_))));
    }

    #[test]
    fn hints_gate_follows_config() {
        let on = TrainingSession::new(owner(), config(true));
        let off = TrainingSession::new(owner(), config(false));
        assert!(on.ensure_hints_enabled().is_ok());
        assert!(matches!(off.ensure_hints_enabled(), Err(TrainingError::InvalidState(_))));
    }
}
