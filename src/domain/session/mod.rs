//! Session module - training sessions, their configuration and dialogue turns.

mod config;
mod errors;
mod message;
mod training_session;

pub use config::{
    AnnexChapter, AuditType, Difficulty, IndustryCode, SessionConfig, StandardCode, MAX_CHAPTER,
    MIN_CHAPTER,
};
pub use errors::TrainingError;
pub use message::{auditor_message_count, Author, Message, NewMessage};
pub use training_session::TrainingSession;
