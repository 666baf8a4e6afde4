//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Minimum HS256 secret length accepted at startup.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Bearer token validation settings (HS256).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim
    pub issuer: Option<String>,

    /// Expected `aud` claim
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn secret(&self) -> &str {
        self.jwt_secret.expose_secret()
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            issuer: None,
            audience: None,
        }
    }

    #[test]
    fn test_validation_missing_secret() {
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        assert_eq!(
            config("too-short").validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN))
        );
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            issuer: Some("audit-trainer".to_string()),
            ..config("0123456789abcdef0123456789abcdef")
        };
        assert!(config.validate().is_ok());
    }
}
