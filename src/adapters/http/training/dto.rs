//! HTTP DTOs for training session endpoints.
//!
//! Field names follow the camelCase JSON the web client already speaks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{CreateSessionResult, HintResult, SessionView};
use crate::domain::assessment::Feedback;
use crate::domain::dialogue::Phase;
use crate::domain::session::{Author, Message, SessionConfig, TrainingError, TrainingSession};
use crate::ports::SessionSummary;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Standards as a list or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StandardsField {
    List(Vec<String>),
    Joined(String),
}

impl StandardsField {
    pub fn into_codes(self) -> Vec<String> {
        match self {
            StandardsField::List(codes) => codes,
            StandardsField::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Request to create a new session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(alias = "standard")]
    pub standards: StandardsField,
    #[serde(rename = "type", alias = "auditType")]
    pub audit_type: String,
    pub difficulty: String,
    #[serde(rename = "annexSLChapters", alias = "chapters")]
    pub chapters: Vec<u8>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub hints_enabled: Option<bool>,
}

/// Request carrying one auditor message.
///
/// `message` is read as raw JSON so a wrong type is reported as a
/// validation failure instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// The message text. Missing or null reads as empty and is rejected by
    /// the turn handler.
    pub fn into_content(self) -> Result<String, TrainingError> {
        match self.message {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(text)) => Ok(text),
            Some(_) => Err(TrainingError::validation("message", "must be a string")),
        }
    }
}

/// Request for a hint; the level defaults to the subtlest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HintRequest {
    #[serde(default)]
    pub level: Option<Value>,
}

pub const DEFAULT_HINT_LEVEL: u8 = 1;

impl HintRequest {
    /// Parses a raw request body. Only an empty body takes the default.
    pub fn from_body(body: &[u8]) -> Result<Self, TrainingError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| TrainingError::validation("body", format!("invalid JSON: {}", e)))
    }

    /// The requested level as an integer; range is checked by the handler.
    pub fn level(&self) -> Result<u8, TrainingError> {
        let invalid = || TrainingError::validation("level", "must be an integer between 1 and 3");
        match &self.level {
            None | Some(Value::Null) => Ok(DEFAULT_HINT_LEVEL),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(invalid),
            Some(_) => Err(invalid()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub welcome_message: String,
}

impl From<CreateSessionResult> for CreateSessionResponse {
    fn from(result: CreateSessionResult) -> Self {
        Self {
            session_id: result.session.id().to_string(),
            welcome_message: result.welcome,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    /// `user` for the auditor, `assistant` for the company.
    pub role: &'static str,
    pub content: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            role: match message.author {
                Author::Auditor => "user",
                Author::Company => "assistant",
            },
            content: message.content,
            created_at: message.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Detailed session view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    #[serde(flatten)]
    pub config: SessionConfig,
    pub hints_used: u32,
    pub phase: Phase,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub messages: Vec<MessageResponse>,
    pub feedback: Option<Feedback>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        let SessionView {
            session,
            messages,
            feedback,
            phase,
        } = view;
        Self {
            id: session.id().to_string(),
            config: session.config().clone(),
            hints_used: session.hints_used(),
            phase,
            created_at: session.created_at().as_datetime().to_rfc3339(),
            completed_at: completed_at(&session),
            messages: messages.into_iter().map(Into::into).collect(),
            feedback,
        }
    }
}

/// Session row for list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryResponse {
    pub id: String,
    #[serde(flatten)]
    pub config: SessionConfig,
    pub message_count: u32,
    pub hints_used: u32,
    pub overall_score: Option<u8>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<SessionSummary> for SessionSummaryResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.session.id().to_string(),
            config: summary.session.config().clone(),
            message_count: summary.message_count,
            hints_used: summary.session.hints_used(),
            overall_score: summary.overall_score,
            created_at: summary.session.created_at().as_datetime().to_rfc3339(),
            completed_at: completed_at(&summary.session),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummaryResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintResponse {
    pub hint: String,
    pub level: u8,
    pub hints_used: u32,
}

impl From<HintResult> for HintResponse {
    fn from(result: HintResult) -> Self {
        Self {
            hint: result.hint,
            level: result.level.number(),
            hints_used: result.hints_used,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteSessionResponse {
    pub success: bool,
    pub feedback: Feedback,
}

/// Error body. `limit` is only present for rate-limit rejections.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn completed_at(session: &TrainingSession) -> Option<String> {
    session.completed_at().map(|t| t.as_datetime().to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_comma_separated_standards() {
        let req: CreateSessionRequest = serde_json::from_value(serde_json::json!({
            "standard": "iso9001,iso14001",
            "type": "intern",
            "difficulty": "medel",
            "annexSLChapters": [7, 8]
        }))
        .unwrap();
        assert_eq!(req.standards.into_codes(), vec!["iso9001", "iso14001"]);
        assert_eq!(req.audit_type, "intern");
        assert!(req.industry.is_none());
        assert!(req.hints_enabled.is_none());
    }

    #[test]
    fn create_request_accepts_standard_list() {
        let req: CreateSessionRequest = serde_json::from_value(serde_json::json!({
            "standards": ["iatf16949"],
            "type": "extern",
            "difficulty": "avancerad",
            "annexSLChapters": [8],
            "industry": "construction",
            "hintsEnabled": false
        }))
        .unwrap();
        assert_eq!(req.standards.into_codes(), vec!["iatf16949"]);
        assert_eq!(req.hints_enabled, Some(false));
    }

    #[test]
    fn empty_hint_body_defaults_to_level_one() {
        for body in ["", "  \n", "{}", r#"{"level": null}"#] {
            let req = HintRequest::from_body(body.as_bytes()).unwrap();
            assert_eq!(req.level().unwrap(), 1);
        }
    }

    #[test]
    fn hint_level_is_read_from_body() {
        let req = HintRequest::from_body(br#"{"level": 3}"#).unwrap();
        assert_eq!(req.level().unwrap(), 3);
    }

    #[test]
    fn malformed_hint_level_is_validation_failure() {
        for body in [r#"{"level": 300}"#, r#"{"level": -1}"#, r#"{"level": "3"}"#, r#"{"level": 2.5}"#] {
            let req = HintRequest::from_body(body.as_bytes()).unwrap();
            match req.level().unwrap_err() {
                TrainingError::ValidationFailed { field, .. } => assert_eq!(field, "level"),
                other => panic!("unexpected error for {body}: {other:?}"),
            }
        }
    }

    #[test]
    fn unparseable_hint_body_is_validation_failure() {
        let err = HintRequest::from_body(b"{level").unwrap_err();
        assert!(matches!(err, TrainingError::ValidationFailed { ref field, .. } if field == "body"));
    }

    #[test]
    fn chat_message_must_be_a_string() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": 42}"#).unwrap();
        match req.into_content().unwrap_err() {
            TrainingError::ValidationFailed { field, .. } => assert_eq!(field, "message"),
            other => panic!("unexpected error: {other:?}"),
        }

        let req: ChatRequest = serde_json::from_str(r#"{"message": "Hej"}"#).unwrap();
        assert_eq!(req.into_content().unwrap(), "Hej");

        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.into_content().unwrap(), "");
    }

    #[test]
    fn error_response_omits_absent_limit() {
        let body = serde_json::to_value(ErrorResponse::new("FORBIDDEN", "Ingen behörighet")).unwrap();
        assert!(body.get("limit").is_none());

        let body = serde_json::to_value(ErrorResponse::new("RATE_LIMITED", "x").with_limit(50)).unwrap();
        assert_eq!(body["limit"], 50);
    }
}
