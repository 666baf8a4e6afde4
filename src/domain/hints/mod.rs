//! Hints module - level-scoped mentor directives and scoring penalties.

mod directive;
mod level;
mod penalty;

pub use directive::{hint_directive, HintContext, MENTOR_SYSTEM_DIRECTIVE};
pub use level::HintLevel;
pub use penalty::{calculate_hint_penalty, hint_usage_summary, MAX_HINT_PENALTY};
