//! AI Provider Adapters.
//!
//! - `AnthropicProvider` - Anthropic Messages API with SSE streaming
//! - `MockAIProvider` - Configurable mock for tests and offline runs

mod anthropic_provider;
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
