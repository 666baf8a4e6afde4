//! Per-session limits and generation budgets

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::TrainingLimits;

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Auditor messages allowed per session
    #[serde(default = "default_max_auditor_messages")]
    pub max_auditor_messages: u32,

    #[serde(default = "default_reply_tokens")]
    pub chat_max_tokens: u32,

    #[serde(default = "default_reply_tokens")]
    pub hint_max_tokens: u32,

    #[serde(default = "default_assessment_tokens")]
    pub assessment_max_tokens: u32,

    #[serde(default = "default_assessment_tokens")]
    pub best_practice_max_tokens: u32,
}

impl TrainingConfig {
    pub fn limits(&self) -> TrainingLimits {
        TrainingLimits {
            max_auditor_messages: self.max_auditor_messages,
            chat_max_tokens: self.chat_max_tokens,
            hint_max_tokens: self.hint_max_tokens,
            assessment_max_tokens: self.assessment_max_tokens,
            best_practice_max_tokens: self.best_practice_max_tokens,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let limits = [
            ("max_auditor_messages", self.max_auditor_messages),
            ("chat_max_tokens", self.chat_max_tokens),
            ("hint_max_tokens", self.hint_max_tokens),
            ("assessment_max_tokens", self.assessment_max_tokens),
            ("best_practice_max_tokens", self.best_practice_max_tokens),
        ];
        match limits.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ValidationError::ZeroLimit(name)),
            None => Ok(()),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_auditor_messages: default_max_auditor_messages(),
            chat_max_tokens: default_reply_tokens(),
            hint_max_tokens: default_reply_tokens(),
            assessment_max_tokens: default_assessment_tokens(),
            best_practice_max_tokens: default_assessment_tokens(),
        }
    }
}

fn default_max_auditor_messages() -> u32 {
    50
}

fn default_reply_tokens() -> u32 {
    1024
}

fn default_assessment_tokens() -> u32 {
    2048
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_handler_limits() {
        assert_eq!(TrainingConfig::default().limits(), TrainingLimits::default());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = TrainingConfig {
            hint_max_tokens: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::ZeroLimit("hint_max_tokens"))
        );
    }
}
