//! Assessment module - grading a completed session.
//!
//! Transcript rendering, the scoring rubric, tolerant parsing of the rubric
//! reply with a fixed fallback, hint penalties and the best-practice
//! comparison. The calls to the generative service live in the application
//! layer; everything here is pure.

mod best_practice;
mod feedback;
mod parser;
mod rubric;
mod scoring;
mod transcript;

pub use best_practice::{
    best_practice_prompt, parse_best_practice, BestPracticeExample,
    BEST_PRACTICE_SYSTEM_DIRECTIVE, MAX_BEST_PRACTICE_EXAMPLES,
};
pub use feedback::{
    Assessment, CompetencyScores, Feedback, RecoveredIssue, MAX_SCORE, MIN_SCORE,
};
pub use parser::{extract_json_array, extract_json_object, parse_assessment, AssessmentParseError};
pub use rubric::RUBRIC_DIRECTIVE;
pub use scoring::apply_hint_penalty;
pub use transcript::render_transcript;
