//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! # Streaming
//!
//! Uses Server-Sent Events with Anthropic's event format. Only
//! `content_block_delta`, `message_delta` and `error` events matter here.
//! Network chunks can split an event anywhere, including inside a multibyte
//! character, so raw bytes are buffered and only complete lines are decoded.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    MessageRole, ProviderInfo, StreamChunk, TokenUsage,
};

/// Default token budget when a request sets none.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures (single-shot calls only).
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the HTTP client cannot be built
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_anthropic_request(&self, request: &CompletionRequest, stream: bool) -> AnthropicRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| AnthropicMessage {
                role: match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
            stream: Some(stream),
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> Result<Response, AIError> {
        let body = self.to_anthropic_request(request, stream);

        tracing::debug!(
            purpose = %request.metadata.purpose,
            trace_id = %request.metadata.trace_id,
            turns = body.messages.len(),
            stream,
            "Sending Anthropic request"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })?;

        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(Self::parse_retry_after(&error_body)),
            400 => AIError::InvalidRequest(error_body),
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        })
    }

    /// Parses "try again in Ns" out of an error body, defaulting to 60.
    fn parse_retry_after(error_body: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|parsed| {
                let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
                let rest = &message[message.find("try again in ")? + 13..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(60)
    }

    async fn parse_response(response: Response) -> Result<CompletionResponse, AIError> {
        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let content = anthropic_response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(
                anthropic_response.usage.input_tokens,
                anthropic_response.usage.output_tokens,
            ),
            model: anthropic_response.model,
            finish_reason: finish_reason(anthropic_response.stop_reason.as_deref()),
        })
    }

    async fn complete_once(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send(request, false).await?;
        Self::parse_response(response).await
    }
}

fn finish_reason(stop_reason: Option<&str>) -> FinishReason {
    match stop_reason {
        Some("max_tokens") => FinishReason::Length,
        _ => FinishReason::Stop,
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            match self.complete_once(&request).await {
                Ok(completion) => return Ok(completion),
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    tracing::warn!(
                        error = %err,
                        attempt = retry_count + 1,
                        purpose = %request.metadata.purpose,
                        "Retrying Anthropic request"
                    );
                }
                Err(err) => return Err(err),
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<CompletionStream, AIError> {
        let response = self.send(&request, true).await?;

        let stream = response
            .bytes_stream()
            .scan(SseDecoder::default(), |decoder, chunk_result| {
                let items = match chunk_result {
                    Ok(bytes) => decoder.feed(&bytes),
                    Err(e) => vec![Err(AIError::network(format!("Stream error: {}", e)))],
                };
                futures::future::ready(Some(items))
            })
            .flat_map(stream::iter);

        Ok(Box::pin(stream))
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        // ~4 characters per token on average
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model, 200_000)
    }
}

/// Incremental parser for Anthropic's SSE framing.
///
/// ```text
/// event: content_block_delta
/// data: {"type":"content_block_delta","delta":{"text":"Hello"}}
/// ```
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: Vec<u8>,
    current_event: String,
}

impl SseDecoder {
    /// Consumes raw bytes and returns chunks for every complete line.
    fn feed(&mut self, bytes: impl AsRef<[u8]>) -> Vec<Result<StreamChunk, AIError>> {
        self.buffer.extend_from_slice(bytes.as_ref());
        let mut results = Vec::new();

        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = match std::str::from_utf8(&raw) {
                Ok(line) => line.trim_end_matches(['\r', '\n']),
                Err(e) => {
                    results.push(Err(AIError::network(format!("Invalid UTF-8 in stream: {}", e))));
                    continue;
                }
            };

            if let Some(event_type) = line.strip_prefix("event:") {
                self.current_event = event_type.trim().to_string();
            } else if let Some(data) = line.strip_prefix("data:") {
                if let Some(item) = parse_event(&self.current_event, data.trim()) {
                    results.push(item);
                }
            }
        }

        results
    }
}

fn parse_event(event: &str, data: &str) -> Option<Result<StreamChunk, AIError>> {
    match event {
        "content_block_delta" => serde_json::from_str::<ContentBlockDelta>(data)
            .ok()
            .and_then(|delta| delta.delta.text)
            .filter(|text| !text.is_empty())
            .map(|text| Ok(StreamChunk::content(text))),
        "message_delta" => serde_json::from_str::<MessageDelta>(data).ok().map(|delta| {
            let usage = delta
                .usage
                .map(|u| TokenUsage::new(u.input_tokens.unwrap_or(0), u.output_tokens))
                .unwrap_or_default();
            Ok(StreamChunk::final_chunk(
                finish_reason(delta.delta.stop_reason.as_deref()),
                usage,
            ))
        }),
        "error" => Some(Err(AIError::unavailable(
            serde_json::from_str::<StreamError>(data)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| "Stream error".to_string()),
        ))),
        // message_start, content_block_start, ping, message_stop
        _ => None,
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ContentBlockDelta {
    delta: TextDelta,
}

#[derive(Debug, Deserialize)]
struct TextDelta {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageDelta {
    delta: MessageDeltaContent,
    usage: Option<StreamUsage>,
}

#[derive(Debug, Deserialize)]
struct MessageDeltaContent {
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamUsage {
    input_tokens: Option<u32>,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    error: StreamErrorContent,
}

#[derive(Debug, Deserialize)]
struct StreamErrorContent {
    message: Option<String>,
}
