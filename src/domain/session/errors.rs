//! Errors surfaced by training session use cases.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Failures a caller can observe from a training session operation.
///
/// Recovered assessment problems are not represented here; see
/// `RecoveredIssue` in the assessment module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingError {
    /// No authenticated caller.
    Unauthenticated,
    /// Session does not exist.
    NotFound(String),
    /// Caller does not own the session.
    Forbidden,
    /// Session is completed, or the requested feature is switched off.
    InvalidState(String),
    /// Request content is malformed.
    ValidationFailed { field: String, message: String },
    /// Auditor message cap reached.
    RateLimited { limit: u32 },
    /// The generative service failed during a dialogue turn or hint.
    UpstreamGenerationFailed(String),
    /// The store rejected or could not complete a write or read.
    PersistenceFailed(String),
}

impl TrainingError {
    pub fn not_found(id: &SessionId) -> Self {
        TrainingError::NotFound(id.to_string())
    }
    pub fn forbidden() -> Self {
        TrainingError::Forbidden
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        TrainingError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TrainingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn rate_limited(limit: u32) -> Self {
        TrainingError::RateLimited { limit }
    }
    pub fn upstream(message: impl Into<String>) -> Self {
        TrainingError::UpstreamGenerationFailed(message.into())
    }
    pub fn persistence(message: impl Into<String>) -> Self {
        TrainingError::PersistenceFailed(message.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TrainingError::Unauthenticated => "UNAUTHENTICATED",
            TrainingError::NotFound(_) => "SESSION_NOT_FOUND",
            TrainingError::Forbidden => "FORBIDDEN",
            TrainingError::InvalidState(_) => "INVALID_STATE",
            TrainingError::ValidationFailed { .. } => "VALIDATION_FAILED",
            TrainingError::RateLimited { .. } => "RATE_LIMITED",
            TrainingError::UpstreamGenerationFailed(_) => "UPSTREAM_GENERATION_FAILED",
            TrainingError::PersistenceFailed(_) => "PERSISTENCE_FAILED",
        }
    }

    pub fn message(&self) -> String {
        match self {
            TrainingError::Unauthenticated => "Authentication required".to_string(),
            TrainingError::NotFound(id) => format!("Session not found: {}", id),
            TrainingError::Forbidden => "Permission denied".to_string(),
            TrainingError::InvalidState(msg) => format!("Invalid state: {}", msg),
            TrainingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TrainingError::RateLimited { limit } => {
                format!("Message limit reached ({} messages per session)", limit)
            }
            TrainingError::UpstreamGenerationFailed(msg) => format!("Generation failed: {}", msg),
            TrainingError::PersistenceFailed(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for TrainingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TrainingError {}

impl From<ValidationError> for TrainingError {
    fn from(err: ValidationError) -> Self {
        TrainingError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for TrainingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => TrainingError::NotFound(
                err.details
                    .get("session_id")
                    .cloned()
                    .unwrap_or_else(|| err.message.clone()),
            ),
            ErrorCode::SessionCompleted | ErrorCode::FeedbackExists => {
                TrainingError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed => TrainingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                TrainingError::PersistenceFailed(err.message)
            }
        }
    }
}
