//! Generative service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Anthropic API configuration.
///
/// Without a key the server falls back to the scripted mock provider,
/// which is refused in production.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.anthropic_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.trim().is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.api_key().is_some()
    }

    /// Validate AI configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if *environment == Environment::Production {
            if !self.has_anthropic() {
                return Err(ValidationError::MissingRequired("AI__ANTHROPIC_API_KEY"));
            }
            if !self.base_url.starts_with("https://") {
                return Err(ValidationError::AiBaseUrlMustBeHttps);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> AiConfig {
        AiConfig {
            anthropic_api_key: Some(Secret::new(key.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert!(!config.has_anthropic());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        assert!(!with_key("  ").has_anthropic());
        assert_eq!(with_key("sk-ant-xxx").api_key(), Some("sk-ant-xxx"));
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let rendered = format!("{:?}", with_key("sk-ant-secret"));
        assert!(!rendered.contains("sk-ant-secret"));
    }

    #[test]
    fn test_development_allows_missing_key() {
        assert!(AiConfig::default().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_production_requires_key() {
        assert_eq!(
            AiConfig::default().validate(&Environment::Production),
            Err(ValidationError::MissingRequired("AI__ANTHROPIC_API_KEY"))
        );
        assert!(with_key("sk-ant-xxx").validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_production_requires_https_base_url() {
        let config = AiConfig {
            base_url: "http://localhost:9000".to_string(),
            ..with_key("sk-ant-xxx")
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::AiBaseUrlMustBeHttps)
        );
    }
}
