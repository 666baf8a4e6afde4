//! CompleteSessionHandler - Assesses a session and closes it.
//!
//! Two upstream calls with separate failure handling:
//! - the rubric call always yields an assessment (parsed or fallback)
//! - the best-practice call yields examples or nothing
//!
//! Feedback and the completion mark are written in one store operation, so a
//! failed write leaves the session open and retryable. Completion is rejected
//! once `completed_at` is set, so at most one feedback record exists.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::assessment::{
    apply_hint_penalty, best_practice_prompt, parse_assessment, parse_best_practice,
    render_transcript, Assessment, BestPracticeExample, Feedback, RecoveredIssue,
    BEST_PRACTICE_SYSTEM_DIRECTIVE, RUBRIC_DIRECTIVE,
};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{Message, TrainingError, TrainingSession};
use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, RequestMetadata, RequestPurpose, SessionStore,
};

use super::{load_owned_session, TrainingLimits};

/// Fewest stored turns that can be assessed.
pub const MIN_MESSAGES_FOR_ASSESSMENT: usize = 2;

#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Stored feedback plus the upstream failures absorbed on the way.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub feedback: Feedback,
    pub recovered: Vec<RecoveredIssue>,
}

/// Handler for session completion.
pub struct CompleteSessionHandler {
    store: Arc<dyn SessionStore>,
    ai_provider: Arc<dyn AIProvider>,
    limits: TrainingLimits,
}

impl CompleteSessionHandler {
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
    /// - `InvalidState` if the session is already completed
    /// - `ValidationFailed` if fewer than two turns are stored
    /// - `PersistenceFailed` if feedback and the completion mark cannot be written
    pub async fn handle(
        &self,
        cmd: CompleteSessionCommand,
    ) -> Result<CompletionOutcome, TrainingError> {
        let session =
            load_owned_session(self.store.as_ref(), &cmd.session_id, &cmd.user_id).await?;
        session.ensure_open()?;

        let messages = self.store.messages(&cmd.session_id).await?;
        if messages.len() < MIN_MESSAGES_FOR_ASSESSMENT {
            return Err(TrainingError::validation(
                "messages",
                format!(
                    "at least {} messages are required to complete a session",
                    MIN_MESSAGES_FOR_ASSESSMENT
                ),
            ));
        }

        let mut recovered = Vec::new();

        // 1. Rubric assessment
        let mut assessment = match self.assess(&session, &cmd.user_id, &messages).await {
            Ok(assessment) => assessment,
            Err(reason) => {
                recovered.push(RecoveredIssue::UpstreamParseRecovered { reason });
                Assessment::fallback()
            }
        };
        apply_hint_penalty(
            &mut assessment,
            session.hints_used(),
            session.config().hints_enabled(),
            session.config().difficulty(),
        );

        // 2. Best-practice comparison
        let best_practice = match self.compare(&session, &cmd.user_id, &messages).await {
            Ok(examples) => examples,
            Err(reason) => {
                warn!(session_id = %cmd.session_id, %reason, "Best-practice comparison skipped");
                recovered.push(RecoveredIssue::UpstreamSecondaryFailed { reason });
                None
            }
        };

        // 3. Persist feedback and close the session together
        let feedback = Feedback::new(cmd.session_id, assessment, best_practice);
        self.store.complete_with_feedback(&feedback).await.map_err(|e| {
            error!(session_id = %cmd.session_id, error = %e, "Failed to store feedback");
            TrainingError::from(e)
        })?;

        info!(
            session_id = %cmd.session_id,
            overall_score = feedback.overall_score(),
            hints_used = session.hints_used(),
            recovered = recovered.len(),
            "Training session completed"
        );

        Ok(CompletionOutcome {
            feedback,
            recovered,
        })
    }

    /// Runs the rubric call. `Err` carries the reason the fallback is needed.
    async fn assess(
        &self,
        session: &TrainingSession,
        user_id: &UserId,
        messages: &[Message],
    ) -> Result<Assessment, String> {
        let request = CompletionRequest::new(RequestMetadata::traced(
            user_id.clone(),
            *session.id(),
            RequestPurpose::Assessment,
        ))
        .with_system_prompt(RUBRIC_DIRECTIVE)
        .with_message(MessageRole::User, render_transcript(session.config(), messages))
        .with_max_tokens(self.limits.assessment_max_tokens);

        let response = self.ai_provider.complete(request).await.map_err(|e| {
            warn!(session_id = %session.id(), error = %e, "Rubric call failed, using fallback feedback");
            format!("rubric call failed: {}", e)
        })?;

        parse_assessment(&response.content).map_err(|e| {
            warn!(
                session_id = %session.id(),
                error = %e,
                raw = %response.content,
                "Unparseable rubric reply, using fallback feedback"
            );
            e.to_string()
        })
    }

    /// Runs the comparison call. `Ok(None)` when there is nothing to compare.
    async fn compare(
        &self,
        session: &TrainingSession,
        user_id: &UserId,
        messages: &[Message],
    ) -> Result<Option<Vec<BestPracticeExample>>, String> {
        let questions: Vec<&str> = messages
            .iter()
            .filter(|m| m.is_from_auditor())
            .map(|m| m.content.as_str())
            .collect();
        if questions.is_empty() {
            return Ok(None);
        }

        let request = CompletionRequest::new(RequestMetadata::traced(
            user_id.clone(),
            *session.id(),
            RequestPurpose::BestPractice,
        ))
        .with_system_prompt(BEST_PRACTICE_SYSTEM_DIRECTIVE)
        .with_message(
            MessageRole::User,
            best_practice_prompt(&questions, session.config().chapters()),
        )
        .with_max_tokens(self.limits.best_practice_max_tokens);

        let response = self
            .ai_provider
            .complete(request)
            .await
            .map_err(|e| format!("best-practice call failed: {}", e))?;

        parse_best_practice(&response.content)
            .map(Some)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::{InMemorySessionStore, StoreOperation};
    use crate::application::handlers::training::test_support::{
        owner, seed_turns, seeded_session,
    };
    use crate::domain::session::NewMessage;

    const RUBRIC_REPLY: &str = r#"{
        "revisionPrinciples": 4,
        "questionTechnique": 4,
        "standardKnowledge": 3,
        "evidenceCollection": 4,
        "communication": 5,
        "overallScore": 4,
        "strengths": ["Tydliga öppna frågor"],
        "developmentAreas": ["Följ upp med verifiering"],
        "missedFindings": [],
        "alternativeStrategies": [],
        "isoReferences": ["ISO 9001:2015 7.2"],
        "summary": "Ett stabilt genomförande."
    }"#;

    const BEST_PRACTICE_REPLY: &str = r#"[
        {"area": "Kompetens", "topic": "Utbildning", "userApproach": "Har ni utbildning?",
         "optimalApproach": "Visa mig kompetensmatrisen.", "technique": "Visa mig",
         "explanation": "Frågan gav inga bevis."}
    ]"#;

    fn handler(store: &InMemorySessionStore, ai: &MockAIProvider) -> CompleteSessionHandler {
        CompleteSessionHandler::new(
            Arc::new(store.clone()),
            Arc::new(ai.clone()),
            TrainingLimits::default(),
        )
    }

    fn command(session_id: SessionId) -> CompleteSessionCommand {
        CompleteSessionCommand {
            session_id,
            user_id: owner(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rubric
    // ════════════════════════════════════════════════════════════════════════════

    mod rubric {
        use super::*;

        #[tokio::test]
        async fn parsed_feedback_is_stored_and_session_closed() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 4).await;
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_response(BEST_PRACTICE_REPLY);

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert!(outcome.recovered.is_empty());
            assert_eq!(outcome.feedback.overall_score(), 4);
            assert_eq!(outcome.feedback.assessment.summary, "Ett stabilt genomförande.");
            assert_eq!(outcome.feedback.best_practice_examples.as_ref().map(Vec::len), Some(1));

            let stored = store.find_feedback(session.id()).await.unwrap().unwrap();
            assert_eq!(stored, outcome.feedback);
            let closed = store.find_by_id(session.id()).await.unwrap().unwrap();
            assert!(closed.is_completed());
        }

        #[tokio::test]
        async fn json_wrapped_in_prose_is_parsed() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_response(format!("Här är bedömningen:\n{}\nLycka till!", RUBRIC_REPLY))
                .with_response(BEST_PRACTICE_REPLY);

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert!(outcome.recovered.is_empty());
            assert_eq!(outcome.feedback.overall_score(), 4);
        }

        #[tokio::test]
        async fn reply_without_json_uses_fallback() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_response("Tyvärr kan jag inte bedöma detta.")
                .with_response(BEST_PRACTICE_REPLY);

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert_eq!(outcome.feedback.overall_score(), 3);
            assert!(outcome.feedback.assessment.summary.contains("Tekniskt fel"));
            assert!(matches!(
                outcome.recovered.as_slice(),
                [RecoveredIssue::UpstreamParseRecovered { .. }]
            ));
            assert!(store.find_feedback(session.id()).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn rubric_call_failure_uses_fallback() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_error(MockError::Timeout { timeout_secs: 60 })
                .with_response(BEST_PRACTICE_REPLY);

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert_eq!(outcome.feedback.assessment, Assessment::fallback());
            assert!(outcome.feedback.best_practice_examples.is_some());
        }

        #[tokio::test]
        async fn hint_penalty_lowers_score_and_adds_summary() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            for _ in 0..6 {
                store.increment_hints_used(session.id()).await.unwrap();
            }
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_response(BEST_PRACTICE_REPLY);

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            // 4 - 0.6 rounds to 3 at medium difficulty.
            assert_eq!(outcome.feedback.overall_score(), 3);
            let areas = &outcome.feedback.assessment.development_areas;
            assert!(areas.last().is_some_and(|a| a.contains("6 hints")));
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Best practice
    // ════════════════════════════════════════════════════════════════════════════

    mod best_practice {
        use super::*;

        #[tokio::test]
        async fn failure_leaves_examples_empty_and_assessment_intact() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_error(MockError::Unavailable {
                    message: "overloaded".to_string(),
                });

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert_eq!(outcome.feedback.overall_score(), 4);
            assert!(outcome.feedback.best_practice_examples.is_none());
            assert!(matches!(
                outcome.recovered.as_slice(),
                [RecoveredIssue::UpstreamSecondaryFailed { .. }]
            ));
        }

        #[tokio::test]
        async fn malformed_reply_leaves_examples_empty() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_response("[{\"area\": ");

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert!(outcome.feedback.best_practice_examples.is_none());
            assert_eq!(outcome.recovered.len(), 1);
        }

        #[tokio::test]
        async fn both_failures_are_recorded_independently() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_response("ingen json")
                .with_response("inte heller här");

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert_eq!(outcome.recovered.len(), 2);
            assert_eq!(outcome.feedback.overall_score(), 3);
            assert!(outcome.feedback.best_practice_examples.is_none());
        }

        #[tokio::test]
        async fn skipped_without_auditor_questions() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            for text in ["Välkommen", "Vi är redo"] {
                store
                    .append_message(session.id(), NewMessage::company(text).unwrap())
                    .await
                    .unwrap();
            }
            let ai = MockAIProvider::new().with_response(RUBRIC_REPLY);

            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert_eq!(ai.call_count(), 1);
            assert!(outcome.feedback.best_practice_examples.is_none());
            assert!(outcome.recovered.is_empty());
        }

        #[tokio::test]
        async fn request_carries_auditor_questions() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 4).await;
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_response(BEST_PRACTICE_REPLY);

            handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            let calls = ai.get_calls();
            assert_eq!(calls.len(), 2);
            assert_eq!(calls[0].metadata.purpose, RequestPurpose::Assessment);
            assert_eq!(calls[1].metadata.purpose, RequestPurpose::BestPractice);
            let prompt = &calls[1].messages[0].content;
            assert!(prompt.contains("1. Fråga 1\n2. Fråga 2"));
            assert!(!prompt.contains("Svar 1"));
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Guards and persistence
    // ════════════════════════════════════════════════════════════════════════════

    mod guards {
        use super::*;

        #[tokio::test]
        async fn second_completion_is_rejected_without_new_feedback() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 2).await;
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_response(BEST_PRACTICE_REPLY);

            handler(&store, &ai).handle(command(*session.id())).await.unwrap();
            let err = handler(&store, &ai).handle(command(*session.id())).await.unwrap_err();

            assert!(matches!(err, TrainingError::InvalidState(_)));
            assert_eq!(store.feedback_count().await, 1);
            assert_eq!(ai.call_count(), 2);
        }

        #[tokio::test]
        async fn too_few_messages_is_validation_error() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 1).await;
            let ai = MockAIProvider::new();

            let err = handler(&store, &ai).handle(command(*session.id())).await.unwrap_err();

            match err {
                TrainingError::ValidationFailed { field, message } => {
                    assert_eq!(field, "messages");
                    assert!(message.contains('2'));
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(ai.call_count(), 0);
        }

        #[tokio::test]
        async fn failed_completion_write_can_be_retried() {
            let store = InMemorySessionStore::new();
            let session = seeded_session(&store, true).await;
            seed_turns(&store, &session, 4).await;
            store.fail_on(StoreOperation::Complete).await;
            let ai = MockAIProvider::new()
                .with_response(RUBRIC_REPLY)
                .with_response(BEST_PRACTICE_REPLY)
                .with_response(RUBRIC_REPLY)
                .with_response(BEST_PRACTICE_REPLY);

            let err = handler(&store, &ai).handle(command(*session.id())).await.unwrap_err();
            assert!(matches!(err, TrainingError::PersistenceFailed(_)));
            let stored = store.find_by_id(session.id()).await.unwrap().unwrap();
            assert!(!stored.is_completed());
            assert!(store.find_feedback(session.id()).await.unwrap().is_none());

            store.clear_failures().await;
            let outcome = handler(&store, &ai).handle(command(*session.id())).await.unwrap();

            assert_eq!(outcome.feedback.overall_score(), 4);
            let stored = store.find_by_id(session.id()).await.unwrap().unwrap();
            assert!(stored.is_completed());
            assert_eq!(store.feedback_count().await, 1);
        }
    }
}
