//! Dialogue module - phase detection and chat directive composition.

mod directive;
mod opening;
mod phase;

pub use directive::{compose_directive, TurnContext, PROGRESS_NOTE_THRESHOLD};
pub(crate) use directive::chapter_list;
pub use opening::opening_welcome;
pub use phase::{detect_phase, Phase, OPENING_MESSAGE_THRESHOLD, RECENT_WINDOW};
