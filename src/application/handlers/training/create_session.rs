//! CreateSessionHandler - Command handler for starting a training session.

use std::sync::Arc;

use tracing::info;

use crate::domain::dialogue::opening_welcome;
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::session::{
    AnnexChapter, AuditType, Difficulty, IndustryCode, SessionConfig, StandardCode,
    TrainingError, TrainingSession,
};
use crate::ports::SessionStore;

/// Command to create a new session from raw request codes.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub user_id: UserId,
    pub standards: Vec<String>,
    pub audit_type: String,
    pub difficulty: String,
    pub chapters: Vec<u8>,
    /// Missing or unknown codes select the manufacturing profile.
    pub industry: Option<String>,
    pub hints_enabled: Option<bool>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: TrainingSession,
    /// Opening-meeting greeting from the company's quality manager.
    pub welcome: String,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, TrainingError> {
        // 1. Validate configuration
        let config = parse_config(&cmd)?;

        // 2. Create and persist aggregate
        let session = TrainingSession::new(cmd.user_id, config);
        self.store.create(&session).await?;

        info!(
            session_id = %session.id(),
            owner = %session.owner(),
            industry = session.config().industry().code(),
            "Training session created"
        );

        let welcome = opening_welcome(session.config());
        Ok(CreateSessionResult { session, welcome })
    }
}

fn parse_config(cmd: &CreateSessionCommand) -> Result<SessionConfig, ValidationError> {
    let standards = cmd
        .standards
        .iter()
        .map(|code| code.parse::<StandardCode>())
        .collect::<Result<Vec<_>, _>>()?;
    let chapters = cmd
        .chapters
        .iter()
        .map(|n| AnnexChapter::new(*n))
        .collect::<Result<Vec<_>, _>>()?;
    let audit_type: AuditType = cmd.audit_type.parse()?;
    let difficulty: Difficulty = cmd.difficulty.parse()?;
    let industry = cmd
        .industry
        .as_deref()
        .map(IndustryCode::from_code_or_default)
        .unwrap_or_default();

    SessionConfig::new(
        standards,
        audit_type,
        difficulty,
        chapters,
        industry,
        cmd.hints_enabled.unwrap_or(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySessionStore, StoreOperation};
    use crate::application::handlers::training::test_support::owner;

    fn command() -> CreateSessionCommand {
        CreateSessionCommand {
            user_id: owner(),
            standards: vec!["iso9001".to_string(), "iso14001".to_string()],
            audit_type: "certifiering".to_string(),
            difficulty: "medel".to_string(),
            chapters: vec![8, 7],
            industry: Some("food".to_string()),
            hints_enabled: None,
        }
    }

    fn handler(store: &InMemorySessionStore) -> CreateSessionHandler {
        CreateSessionHandler::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn creates_and_persists_session() {
        let store = InMemorySessionStore::new();
        let result = handler(&store).handle(command()).await.unwrap();

        let stored = store.find_by_id(result.session.id()).await.unwrap().unwrap();
        assert_eq!(stored.owner(), &owner());
        assert_eq!(stored.config().industry(), IndustryCode::Food);
        assert_eq!(stored.hints_used(), 0);
        assert!(!stored.is_completed());
    }

    #[tokio::test]
    async fn hints_default_to_enabled() {
        let store = InMemorySessionStore::new();
        let result = handler(&store).handle(command()).await.unwrap();
        assert!(result.session.config().hints_enabled());
    }

    #[tokio::test]
    async fn returns_welcome_text() {
        let store = InMemorySessionStore::new();
        let result = handler(&store).handle(command()).await.unwrap();
        assert!(!result.welcome.is_empty());
        assert_eq!(result.welcome, opening_welcome(result.session.config()));
    }

    #[tokio::test]
    async fn missing_industry_selects_manufacturing() {
        let store = InMemorySessionStore::new();
        let mut cmd = command();
        cmd.industry = None;
        let result = handler(&store).handle(cmd).await.unwrap();
        assert_eq!(result.session.config().industry(), IndustryCode::Manufacturing);
    }

    #[tokio::test]
    async fn unknown_standard_is_rejected() {
        let store = InMemorySessionStore::new();
        let mut cmd = command();
        cmd.standards = vec!["iso27001".to_string()];
        let err = handler(&store).handle(cmd).await.unwrap_err();
        assert!(matches!(err, TrainingError::ValidationFailed { ref field, .. } if field == "standards"));
    }

    #[tokio::test]
    async fn empty_chapters_are_rejected() {
        let store = InMemorySessionStore::new();
        let mut cmd = command();
        cmd.chapters.clear();
        let err = handler(&store).handle(cmd).await.unwrap_err();
        assert!(matches!(err, TrainingError::ValidationFailed { ref field, .. } if field == "chapters"));
    }

    #[tokio::test]
    async fn chapter_outside_annex_range_is_rejected() {
        let store = InMemorySessionStore::new();
        let mut cmd = command();
        cmd.chapters = vec![3];
        let err = handler(&store).handle(cmd).await.unwrap_err();
        assert!(matches!(err, TrainingError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_difficulty_is_rejected() {
        let store = InMemorySessionStore::new();
        let mut cmd = command();
        cmd.difficulty = "extrem".to_string();
        assert!(handler(&store).handle(cmd).await.is_err());
    }

    #[tokio::test]
    async fn store_failure_maps_to_persistence_failed() {
        let store = InMemorySessionStore::new();
        store.fail_on(StoreOperation::Create).await;
        let err = handler(&store).handle(command()).await.unwrap_err();
        assert!(matches!(err, TrainingError::PersistenceFailed(_)));
    }
}
