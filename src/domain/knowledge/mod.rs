//! Knowledge module - static reference content for the simulation.
//!
//! Chapter references, difficulty calibration, industry rosters, audit-type
//! framings, multi-standard overlays, closing-meeting lexicon, hint topics and
//! interview techniques. Everything here is immutable data plus lookups.

mod audit_types;
mod chapters;
mod closing;
mod hint_topics;
mod industries;
mod overlays;
mod techniques;

pub use audit_types::{attendee_lines, audit_type_profile, AuditTypeProfile};
pub use chapters::{
    calibrated_findings, chapter_reference, difficulty_profile, ChapterReference,
    DifficultyProfile, ReferenceDocument,
};
pub use closing::{is_closing_meeting_request, CLOSING_REACTION_RULES, CLOSING_TRIGGERS};
pub(crate) use closing::contains_closing_trigger;
pub use hint_topics::chapter_hint_topics;
pub use industries::{
    industry_profile, industry_profile_by_code, Character, CompanyProfile, IndustryProfile,
    StaffRole,
};
pub use overlays::{
    standard_overlay, LatentFinding, StandardOverlay, INTEGRATED_COMMON_ELEMENTS,
    INTEGRATED_LINKS, INTEGRATED_SYSTEM_GAPS,
};
pub use techniques::{chapter_practices, interview_techniques, ChapterPractice, InterviewTechnique};
