//! AI Provider Port - Interface for the generative-text service.
//!
//! The dialogue orchestrator streams company replies through this port and
//! the hint and assessment handlers use single-shot completions. Replies are
//! untrusted text; callers that expect JSON run them through the tolerant
//! extractor in `domain::assessment`.
//!
//! # Example
//!
//! ```ignore
//! let request = CompletionRequest::new(metadata)
//!     .with_system_prompt(directive)
//!     .with_message(MessageRole::User, "Hur styr ni dokument?")
//!     .with_max_tokens(1024);
//! let mut stream = provider.stream_complete(request).await?;
//! ```

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::pin::Pin;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::Author;

/// Boxed stream of completion chunks.
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AIError>> + Send>>;

/// Port for generative-text provider interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion (non-streaming).
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Generate a streaming completion.
    ///
    /// An `Err` here means the stream could not be started. Failures after
    /// the first chunk arrive as `Err` items inside the stream.
    async fn stream_complete(&self, request: CompletionRequest)
        -> Result<CompletionStream, AIError>;

    /// Rough token estimate for logging request sizes.
    fn estimate_tokens(&self, text: &str) -> u32;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation turns, oldest first.
    pub messages: Vec<Message>,
    /// System directive.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    /// Appends stored dialogue turns in order.
    pub fn with_transcript(mut self, turns: &[crate::domain::session::Message]) -> Self {
        self.messages.extend(
            turns
                .iter()
                .map(|turn| Message::new(MessageRole::from(turn.author), turn.content.clone())),
        );
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Input from the auditor (or a synthesized instruction turn).
    User,
    /// Model output, i.e. the simulated company.
    Assistant,
}

impl From<Author> for MessageRole {
    fn from(author: Author) -> Self {
        match author {
            Author::Auditor => MessageRole::User,
            Author::Company => MessageRole::Assistant,
        }
    }
}

/// Which use case issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPurpose {
    /// Company reply in the dialogue.
    Chat,
    /// Mentor hint.
    Hint,
    /// Rubric grading at completion.
    Assessment,
    /// Best-practice comparison at completion.
    BestPractice,
}

impl fmt::Display for RequestPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestPurpose::Chat => "chat",
            RequestPurpose::Hint => "hint",
            RequestPurpose::Assessment => "assessment",
            RequestPurpose::BestPractice => "best_practice",
        };
        f.write_str(s)
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub purpose: RequestPurpose,
    /// Trace ID for correlating provider logs with a request.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(
        user_id: UserId,
        session_id: SessionId,
        purpose: RequestPurpose,
        trace_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            purpose,
            trace_id: trace_id.into(),
        }
    }

    /// Metadata with a fresh random trace id.
    pub fn traced(user_id: UserId, session_id: SessionId, purpose: RequestPurpose) -> Self {
        Self::new(user_id, session_id, purpose, uuid::Uuid::new_v4().to_string())
    }
}

/// Response from AI completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    /// An error occurred.
    Error,
}

/// Streaming chunk from AI completion.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    /// New content in this chunk.
    pub delta: String,
    /// If present, generation is complete.
    pub finish_reason: Option<FinishReason>,
    /// Token usage (only present on final chunk).
    pub usage: Option<TokenUsage>,
}

impl StreamChunk {
    /// Creates a content chunk.
    pub fn content(delta: impl Into<String>) -> Self {
        Self {
            delta: delta.into(),
            finish_reason: None,
            usage: None,
        }
    }

    /// Creates a final chunk with usage information.
    pub fn final_chunk(finish_reason: FinishReason, usage: TokenUsage) -> Self {
        Self {
            delta: String::new(),
            finish_reason: Some(finish_reason),
            usage: Some(usage),
        }
    }

    pub fn is_final(&self) -> bool {
        self.finish_reason.is_some()
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "anthropic").
    pub name: String,
    /// Model identifier.
    pub model: String,
    /// Maximum context window size in tokens.
    pub max_context_tokens: u32,
}

impl ProviderInfo {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        max_context_tokens: u32,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
        }
    }
}

/// AI provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::NewMessage;

    fn test_metadata() -> RequestMetadata {
        RequestMetadata::new(
            UserId::new("auditor-1").unwrap(),
            SessionId::new(),
            RequestPurpose::Chat,
            "trace-123",
        )
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new(test_metadata())
            .with_message(MessageRole::User, "Hej")
            .with_system_prompt("Spela företaget")
            .with_max_tokens(100)
            .with_temperature(0.7);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.system_prompt, Some("Spela företaget".to_string()));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.7));
    }

    #[test]
    fn transcript_maps_authors_to_roles_in_order() {
        let session_id = SessionId::new();
        let turns = vec![
            crate::domain::session::Message::from_new(
                session_id,
                NewMessage::auditor("Fråga").unwrap(),
                1,
            ),
            crate::domain::session::Message::from_new(
                session_id,
                NewMessage::company("Svar").unwrap(),
                2,
            ),
        ];

        let request = CompletionRequest::new(test_metadata())
            .with_transcript(&turns)
            .with_message(MessageRole::User, "Nästa");

        assert_eq!(
            request.messages,
            vec![Message::user("Fråga"), Message::assistant("Svar"), Message::user("Nästa")]
        );
    }

    #[test]
    fn traced_metadata_gets_unique_trace_ids() {
        let user = UserId::new("u").unwrap();
        let session = SessionId::new();
        let a = RequestMetadata::traced(user.clone(), session, RequestPurpose::Hint);
        let b = RequestMetadata::traced(user, session, RequestPurpose::Hint);
        assert_ne!(a.trace_id, b.trace_id);
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(TokenUsage::zero().total_tokens, 0);
    }

    #[test]
    fn stream_chunk_final_has_usage() {
        let chunk = StreamChunk::content("Hej");
        assert!(!chunk.is_final());

        let usage = TokenUsage::new(10, 5);
        let last = StreamChunk::final_chunk(FinishReason::Stop, usage.clone());
        assert!(last.is_final());
        assert_eq!(last.delta, "");
        assert_eq!(last.usage, Some(usage));
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::content_filtered("bad").is_retryable());
        assert!(!AIError::parse("bad json").is_retryable());
    }

    #[test]
    fn purpose_displays_snake_case() {
        assert_eq!(RequestPurpose::BestPractice.to_string(), "best_practice");
        assert_eq!(
            serde_json::to_string(&RequestPurpose::BestPractice).unwrap(),
            "\"best_practice\""
        );
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::rate_limited(30).to_string(), "rate limited: retry after 30s");
        assert_eq!(
            AIError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
    }
}
