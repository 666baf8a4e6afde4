//! Assessment result types.

use serde::{Deserialize, Serialize};

use super::best_practice::BestPracticeExample;
use crate::domain::foundation::{FeedbackId, SessionId, Timestamp};

/// Lowest score on the rubric scale.
pub const MIN_SCORE: u8 = 1;

/// Highest score on the rubric scale.
pub const MAX_SCORE: u8 = 5;

/// Eight competency scores. `None` means the activity did not occur.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyScores {
    pub revision_principles: Option<u8>,
    pub question_technique: Option<u8>,
    pub standard_knowledge: Option<u8>,
    pub evidence_collection: Option<u8>,
    pub nonconformity_class: Option<u8>,
    pub communication: Option<u8>,
    pub opening_meeting: Option<u8>,
    pub closing_meeting: Option<u8>,
}

impl CompetencyScores {
    /// Scores that are present, in rubric order.
    pub fn present(&self) -> Vec<u8> {
        [
            self.revision_principles,
            self.question_technique,
            self.standard_knowledge,
            self.evidence_collection,
            self.nonconformity_class,
            self.communication,
            self.opening_meeting,
            self.closing_meeting,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Rubric outcome before it is attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(flatten)]
    pub scores: CompetencyScores,
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
    pub missed_findings: Vec<String>,
    pub alternative_strategies: Vec<String>,
    pub iso_references: Vec<String>,
    pub summary: String,
}

impl Assessment {
    /// The fixed, always-valid result used when the rubric reply is unusable.
    /// Every competency carries the neutral score.
    pub fn fallback() -> Self {
        Self {
            scores: CompetencyScores {
                revision_principles: Some(3),
                question_technique: Some(3),
                standard_knowledge: Some(3),
                evidence_collection: Some(3),
                nonconformity_class: Some(3),
                communication: Some(3),
                opening_meeting: Some(3),
                closing_meeting: Some(3),
            },
            overall_score: 3,
            strengths: vec!["Genomförde revisionen".to_string()],
            development_areas: vec!["Kunde inte generera detaljerad feedback".to_string()],
            missed_findings: Vec::new(),
            alternative_strategies: Vec::new(),
            iso_references: Vec::new(),
            summary: "Sessionen genomfördes. Tekniskt fel vid feedbackgenerering.".to_string(),
        }
    }
}

/// Persisted feedback: one per session, immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub session_id: SessionId,
    #[serde(flatten)]
    pub assessment: Assessment,
    /// `None` when the comparison call failed; never partially populated.
    pub best_practice_examples: Option<Vec<BestPracticeExample>>,
    pub created_at: Timestamp,
}

impl Feedback {
    pub fn new(
        session_id: SessionId,
        assessment: Assessment,
        best_practice_examples: Option<Vec<BestPracticeExample>>,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            session_id,
            assessment,
            best_practice_examples,
            created_at: Timestamp::now(),
        }
    }

    pub fn overall_score(&self) -> u8 {
        self.assessment.overall_score
    }
}

/// An upstream failure the assessment pipeline absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecoveredIssue {
    /// The rubric reply could not be parsed; fallback feedback was used.
    UpstreamParseRecovered { reason: String },
    /// The best-practice call failed; the comparison list was left empty.
    UpstreamSecondaryFailed { reason: String },
}
