//! Dialogue turns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{MessageId, SessionId, Timestamp, ValidationError};

/// Who wrote a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The trainee conducting the audit.
    Auditor,
    /// The simulated company staff.
    Company,
}

impl Author {
    pub fn code(&self) -> &'static str {
        match self {
            Author::Auditor => "auditor",
            Author::Company => "company",
        }
    }

    /// Parses a stored code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "auditor" => Some(Author::Auditor),
            "company" => Some(Author::Company),
            _ => None,
        }
    }

    /// Transcript label used in assessment prompts.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Author::Auditor => "REVISOR",
            Author::Company => "FÖRETAG",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A turn that has not yet been stored.
///
/// Content is trimmed on construction and can never be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    author: Author,
    content: String,
}

impl NewMessage {
    /// Creates a turn, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if nothing remains after trimming
    pub fn new(author: Author, content: &str) -> Result<Self, ValidationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            author,
            content: trimmed.to_string(),
        })
    }

    pub fn auditor(content: &str) -> Result<Self, ValidationError> {
        Self::new(Author::Auditor, content)
    }

    pub fn company(content: &str) -> Result<Self, ValidationError> {
        Self::new(Author::Company, content)
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A stored turn.
///
/// `sequence` is assigned by the store at write time and is strictly
/// increasing within a session; it is the only ordering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub session_id: SessionId,
    pub author: Author,
    pub content: String,
    pub sequence: i64,
    pub created_at: Timestamp,
}

impl Message {
    /// Materializes a pending turn with store-assigned ordering.
    pub fn from_new(session_id: SessionId, message: NewMessage, sequence: i64) -> Self {
        Self {
            id: MessageId::new(),
            session_id,
            author: message.author,
            content: message.content,
            sequence,
            created_at: Timestamp::now(),
        }
    }

    pub fn is_from_auditor(&self) -> bool {
        self.author == Author::Auditor
    }
}

/// Counts turns written by the auditor.
pub fn auditor_message_count(messages: &[Message]) -> usize {
    messages.iter().filter(|m| m.is_from_auditor()).count()
}
