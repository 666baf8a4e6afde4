//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling a real generative service.
//!
//! # Features
//!
//! - Queued responses, consumed in order by `complete` and `stream_complete`
//! - Scripted streams with exact chunk boundaries
//! - Mid-stream failure after a partial reply
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_stream(["Part 1", " Part 2"])
//!     .with_response(r#"{"overallScore": 4, "summary": "Bra"}"#);
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    ProviderInfo, StreamChunk, TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Whole reply; streamed word by word when used for streaming.
    Success { content: String },
    /// Exact chunks followed by a final chunk.
    Stream { chunks: Vec<String> },
    /// Chunks followed by an in-stream error.
    StreamFailure { chunks: Vec<String>, error: MockError },
    /// Chunks, then the stream closes without a final chunk.
    TruncatedStream { chunks: Vec<String> },
    /// The call itself fails.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 200_000),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
        })
    }

    /// Adds a stream with exact chunk boundaries.
    pub fn with_stream<I, S>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::Stream {
            chunks: chunks.into_iter().map(Into::into).collect(),
        })
    }

    /// Adds a stream that fails after delivering `chunks`.
    pub fn with_stream_failure<I, S>(self, chunks: I, error: MockError) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::StreamFailure {
            chunks: chunks.into_iter().map(Into::into).collect(),
            error,
        })
    }

    /// Adds a stream that ends after `chunks` without signalling completion.
    pub fn with_truncated_stream<I, S>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::TruncatedStream {
            chunks: chunks.into_iter().map(Into::into).collect(),
        })
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
            })
    }

    async fn record(&self, request: CompletionRequest) {
        self.calls.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

fn content_chunks(chunks: Vec<String>) -> Vec<Result<StreamChunk, AIError>> {
    chunks.into_iter().map(|c| Ok(StreamChunk::content(c))).collect()
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.record(request).await;

        let content = match self.next_response() {
            MockResponse::Success { content } => content,
            MockResponse::Stream { chunks } | MockResponse::TruncatedStream { chunks } => chunks.concat(),
            MockResponse::StreamFailure { error, .. } | MockResponse::Error(error) => {
                return Err(error.into())
            }
        };
        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(10, 20),
            model: self.info.model.clone(),
            finish_reason: FinishReason::Stop,
        })
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<CompletionStream, AIError> {
        self.record(request).await;

        let final_chunk = || Ok(StreamChunk::final_chunk(FinishReason::Stop, TokenUsage::new(10, 20)));
        match self.next_response() {
            MockResponse::Success { content } => {
                // Split on spaces but keep them, so the chunks concatenate back
                let chunks: Vec<String> = content.split_inclusive(' ').map(String::from).collect();
                let items = content_chunks(chunks);
                Ok(Box::pin(stream::iter(items).chain(stream::once(async move { final_chunk() }))))
            }
            MockResponse::Stream { chunks } => {
                let items = content_chunks(chunks);
                Ok(Box::pin(stream::iter(items).chain(stream::once(async move { final_chunk() }))))
            }
            MockResponse::StreamFailure { chunks, error } => {
                let mut items = content_chunks(chunks);
                items.push(Err(error.into()));
                Ok(Box::pin(stream::iter(items)))
            }
            MockResponse::TruncatedStream { chunks } => Ok(Box::pin(stream::iter(content_chunks(chunks)))),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        // Rough approximation: ~4 characters per token
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, UserId};
    use crate::ports::{MessageRole, RequestMetadata, RequestPurpose};

    fn test_request() -> CompletionRequest {
        let metadata = RequestMetadata::new(
            UserId::new("auditor-1").unwrap(),
            SessionId::new(),
            RequestPurpose::Chat,
            "trace-123",
        );
        CompletionRequest::new(metadata).with_message(MessageRole::User, "Hej")
    }

    async fn collect(stream: CompletionStream) -> (Vec<String>, Option<AIError>) {
        let mut deltas = Vec::new();
        let mut error = None;
        let mut stream = stream;
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) if chunk.is_final() => break,
                Ok(chunk) => deltas.push(chunk.delta),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }
        (deltas, error)
    }

    #[tokio::test]
    async fn returns_responses_in_order_then_default() {
        let provider = MockAIProvider::new().with_response("Första").with_response("Andra");

        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Första");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Andra");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider =
            MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });

        let err = provider.complete(test_request()).await.unwrap_err();
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.complete(test_request()).await.unwrap();
        let _ = provider.stream_complete(test_request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].messages[0].content, "Hej");
    }

    #[tokio::test]
    async fn scripted_stream_keeps_chunk_boundaries() {
        let provider = MockAIProvider::new().with_stream(["Part 1", " Part 2"]);

        let stream = provider.stream_complete(test_request()).await.unwrap();
        let (deltas, error) = collect(stream).await;

        assert_eq!(deltas, vec!["Part 1", " Part 2"]);
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn plain_response_streams_back_to_same_text() {
        let provider = MockAIProvider::new().with_response("Välkommen till revisionen");

        let stream = provider.stream_complete(test_request()).await.unwrap();
        let (deltas, _) = collect(stream).await;

        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas.concat(), "Välkommen till revisionen");
    }

    #[tokio::test]
    async fn stream_failure_yields_partial_then_error() {
        let provider = MockAIProvider::new()
            .with_stream_failure(["Halv"], MockError::Network { message: "reset".into() });

        let stream = provider.stream_complete(test_request()).await.unwrap();
        let (deltas, error) = collect(stream).await;

        assert_eq!(deltas, vec!["Halv"]);
        assert!(matches!(error, Some(AIError::Network(_))));
    }

    #[tokio::test]
    async fn start_error_fails_stream_call() {
        let provider = MockAIProvider::new()
            .with_error(MockError::Unavailable { message: "nere".to_string() });

        let result = provider.stream_complete(test_request()).await;
        assert!(matches!(result, Err(AIError::Unavailable { .. })));
    }

    #[test]
    fn estimates_tokens() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.estimate_tokens("Hi"), 1);
        assert_eq!(provider.estimate_tokens("Hello world"), 2);
    }

    #[tokio::test]
    async fn respects_delay() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(20));

        let start = std::time::Instant::now();
        provider.complete(test_request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
