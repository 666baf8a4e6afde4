//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is produced by a `SessionValidator` adapter and
//! placed into request extensions by the HTTP middleware. Nothing here knows
//! which identity provider issued the token.

use super::UserId;
use thiserror::Error;

/// The caller behind a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject claim of the token; owner key for training sessions.
    pub id: UserId,

    /// Email claim, when the provider includes one.
    pub email: Option<String>,

    /// Display name, when the provider includes one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a user with only an identifier.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            display_name: None,
        }
    }

    /// Sets the email claim.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns the display name, email, or id, whichever is present first.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

/// Token validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The validator could not reach its key material or provider.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if the client should obtain a fresh token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id() -> UserId {
        UserId::new("auditor-1").unwrap()
    }

    #[test]
    fn label_prefers_display_name() {
        let user = AuthenticatedUser::new(user_id())
            .with_email("a@example.com")
            .with_display_name("Alva");
        assert_eq!(user.label(), "Alva");
    }

    #[test]
    fn label_falls_back_to_email_then_id() {
        let with_email = AuthenticatedUser::new(user_id()).with_email("a@example.com");
        assert_eq!(with_email.label(), "a@example.com");

        let bare = AuthenticatedUser::new(user_id());
        assert_eq!(bare.label(), "auditor-1");
    }

    #[test]
    fn reauthentication_classification() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::ServiceUnavailable("down".into()).requires_reauthentication());
    }
}
