//! Tolerant parsing of generative replies that embed JSON in prose.
//!
//! The service is asked for pure JSON but may wrap it in text. Extraction
//! takes the outermost delimiters (first opening to last closing) and parses
//! that slice. Callers decide what to do on failure; the rubric path always
//! substitutes `Assessment::fallback()`.

use serde::Deserialize;
use thiserror::Error;

use super::feedback::{Assessment, CompetencyScores, MAX_SCORE, MIN_SCORE};

/// Neutral score used when nothing can be derived.
const NEUTRAL_SCORE: u8 = 3;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssessmentParseError {
    #[error("no JSON {0} found in reply")]
    NotFound(&'static str),

    #[error("JSON parse error: {0}")]
    Malformed(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("reply contained no entries")]
    Empty,
}

/// Slice from the first `{` to the last `}` inclusive.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    extract_between(raw, '{', '}')
}

/// Slice from the first `[` to the last `]` inclusive.
pub fn extract_json_array(raw: &str) -> Option<&str> {
    extract_between(raw, '[', ']')
}

fn extract_between(raw: &str, open: char, close: char) -> Option<&str> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssessment {
    revision_principles: Option<f64>,
    question_technique: Option<f64>,
    standard_knowledge: Option<f64>,
    evidence_collection: Option<f64>,
    nonconformity_class: Option<f64>,
    communication: Option<f64>,
    opening_meeting: Option<f64>,
    closing_meeting: Option<f64>,
    overall_score: Option<f64>,
    strengths: Option<Vec<String>>,
    development_areas: Option<Vec<String>>,
    missed_findings: Option<Vec<String>>,
    alternative_strategies: Option<Vec<String>>,
    iso_references: Option<Vec<String>>,
    summary: Option<String>,
}

/// Parses a rubric reply into an `Assessment`.
///
/// Scores are rounded and clamped to 1-5. Missing lists become empty. A
/// missing overall score is the rounded mean of the present scores. The
/// summary is required.
pub fn parse_assessment(raw: &str) -> Result<Assessment, AssessmentParseError> {
    let json = extract_json_object(raw).ok_or(AssessmentParseError::NotFound("object"))?;
    let parsed: RawAssessment =
        serde_json::from_str(json).map_err(|e| AssessmentParseError::Malformed(e.to_string()))?;

    let summary = parsed
        .summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(AssessmentParseError::MissingField("summary"))?;

    let scores = CompetencyScores {
        revision_principles: normalize_score(parsed.revision_principles),
        question_technique: normalize_score(parsed.question_technique),
        standard_knowledge: normalize_score(parsed.standard_knowledge),
        evidence_collection: normalize_score(parsed.evidence_collection),
        nonconformity_class: normalize_score(parsed.nonconformity_class),
        communication: normalize_score(parsed.communication),
        opening_meeting: normalize_score(parsed.opening_meeting),
        closing_meeting: normalize_score(parsed.closing_meeting),
    };
    let overall_score =
        normalize_score(parsed.overall_score).unwrap_or_else(|| derived_overall(&scores));

    Ok(Assessment {
        scores,
        overall_score,
        strengths: parsed.strengths.unwrap_or_default(),
        development_areas: parsed.development_areas.unwrap_or_default(),
        missed_findings: parsed.missed_findings.unwrap_or_default(),
        alternative_strategies: parsed.alternative_strategies.unwrap_or_default(),
        iso_references: parsed.iso_references.unwrap_or_default(),
        summary,
    })
}

fn normalize_score(value: Option<f64>) -> Option<u8> {
    let value = value.filter(|v| v.is_finite())?;
    Some(clamp_score(value.round()))
}

pub(crate) fn clamp_score(value: f64) -> u8 {
    value.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

fn derived_overall(scores: &CompetencyScores) -> u8 {
    let present = scores.present();
    if present.is_empty() {
        return NEUTRAL_SCORE;
    }
    let sum: u32 = present.iter().map(|s| u32::from(*s)).sum();
    clamp_score((f64::from(sum) / present.len() as f64).round())
}
