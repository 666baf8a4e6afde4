//! Session configuration value objects.
//!
//! Every enum here carries the stable string code used on the wire and in
//! storage. Parsing from a client request is strict (`FromStr`); loading from
//! storage uses the lenient `from_code_or_default` constructors so a row
//! written by an older build never makes a session unreadable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lowest Annex SL chapter that can be selected.
pub const MIN_CHAPTER: u8 = 4;

/// Highest Annex SL chapter that can be selected.
pub const MAX_CHAPTER: u8 = 10;

// ════════════════════════════════════════════════════════════════════════════
// Standards
// ════════════════════════════════════════════════════════════════════════════

/// Management system standard covered by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardCode {
    Iso9001,
    Iso14001,
    Iso45001,
    Iatf16949,
}

impl StandardCode {
    pub const ALL: [StandardCode; 4] = [
        StandardCode::Iso9001,
        StandardCode::Iso14001,
        StandardCode::Iso45001,
        StandardCode::Iatf16949,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            StandardCode::Iso9001 => "iso9001",
            StandardCode::Iso14001 => "iso14001",
            StandardCode::Iso45001 => "iso45001",
            StandardCode::Iatf16949 => "iatf16949",
        }
    }

    /// Full name as rendered in directives and transcripts.
    pub fn display_name(&self) -> &'static str {
        match self {
            StandardCode::Iso9001 => "ISO 9001:2015 (Kvalitet)",
            StandardCode::Iso14001 => "ISO 14001:2015 (Miljö)",
            StandardCode::Iso45001 => "ISO 45001:2018 (Arbetsmiljö)",
            StandardCode::Iatf16949 => "IATF 16949:2016 (Fordon)",
        }
    }

    /// Short label such as "ISO 9001".
    pub fn short_name(&self) -> &'static str {
        match self {
            StandardCode::Iso9001 => "ISO 9001",
            StandardCode::Iso14001 => "ISO 14001",
            StandardCode::Iso45001 => "ISO 45001",
            StandardCode::Iatf16949 => "IATF 16949",
        }
    }
}

impl fmt::Display for StandardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StandardCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardCode::ALL
            .into_iter()
            .find(|standard| standard.code() == s)
            .ok_or_else(|| {
                ValidationError::invalid_value("standards", format!("unknown standard '{}'", s))
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Audit type
// ════════════════════════════════════════════════════════════════════════════

/// Kind of engagement being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditType {
    #[serde(rename = "intern")]
    Internal,
    #[serde(rename = "extern")]
    SecondParty,
    #[serde(rename = "certifiering")]
    Certification,
    #[serde(rename = "overvakning")]
    Surveillance,
}

impl AuditType {
    pub const ALL: [AuditType; 4] = [
        AuditType::Internal,
        AuditType::SecondParty,
        AuditType::Certification,
        AuditType::Surveillance,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AuditType::Internal => "intern",
            AuditType::SecondParty => "extern",
            AuditType::Certification => "certifiering",
            AuditType::Surveillance => "overvakning",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AuditType::Internal => "Internrevision",
            AuditType::SecondParty => "Extern revision (andra part)",
            AuditType::Certification => "Certifieringsrevision",
            AuditType::Surveillance => "Övervakningsrevision",
        }
    }

    /// Resolves a stored code, falling back to certification for anything
    /// unrecognized.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or(AuditType::Certification)
    }
}

impl fmt::Display for AuditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AuditType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditType::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| {
                ValidationError::invalid_value("auditType", format!("unknown audit type '{}'", s))
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Difficulty
// ════════════════════════════════════════════════════════════════════════════

/// How hard the simulated company makes it to find nonconformities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "grundlaggande")]
    Basic,
    #[serde(rename = "medel")]
    Medium,
    #[serde(rename = "avancerad")]
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Basic, Difficulty::Medium, Difficulty::Advanced];

    pub fn code(&self) -> &'static str {
        match self {
            Difficulty::Basic => "grundlaggande",
            Difficulty::Medium => "medel",
            Difficulty::Advanced => "avancerad",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Basic => "Grundläggande",
            Difficulty::Medium => "Medel",
            Difficulty::Advanced => "Avancerad",
        }
    }

    /// Lenient lookup used when reading stored rows; unknown codes read as medium.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or(Difficulty::Medium)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|level| level.code() == s)
            .ok_or_else(|| {
                ValidationError::invalid_value("difficulty", format!("unknown difficulty '{}'", s))
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Chapters
// ════════════════════════════════════════════════════════════════════════════

/// Annex SL clause number in the range 4..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnnexChapter(u8);

impl AnnexChapter {
    pub fn new(number: u8) -> Result<Self, ValidationError> {
        if !(MIN_CHAPTER..=MAX_CHAPTER).contains(&number) {
            return Err(ValidationError::out_of_range(
                "chapters",
                MIN_CHAPTER as i32,
                MAX_CHAPTER as i32,
                number as i32,
            ));
        }
        Ok(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AnnexChapter {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AnnexChapter::new(value)
    }
}

impl From<AnnexChapter> for u8 {
    fn from(chapter: AnnexChapter) -> Self {
        chapter.0
    }
}

impl fmt::Display for AnnexChapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Industry
// ════════════════════════════════════════════════════════════════════════════

/// Which simulated company profile the session runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndustryCode {
    #[default]
    Manufacturing,
    Food,
    Construction,
}

impl IndustryCode {
    pub const ALL: [IndustryCode; 3] = [
        IndustryCode::Manufacturing,
        IndustryCode::Food,
        IndustryCode::Construction,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            IndustryCode::Manufacturing => "manufacturing",
            IndustryCode::Food => "food",
            IndustryCode::Construction => "construction",
        }
    }

    /// Lenient lookup; unknown codes resolve to the manufacturing profile.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl fmt::Display for IndustryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for IndustryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndustryCode::ALL
            .into_iter()
            .find(|industry| industry.code() == s)
            .ok_or_else(|| {
                ValidationError::invalid_value("industry", format!("unknown industry '{}'", s))
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionConfig
// ════════════════════════════════════════════════════════════════════════════

/// Immutable configuration chosen when a session is created.
///
/// # Invariants
///
/// - `standards` is non-empty, deduplicated and sorted
/// - `chapters` is non-empty, deduplicated and sorted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    standards: Vec<StandardCode>,
    audit_type: AuditType,
    difficulty: Difficulty,
    chapters: Vec<AnnexChapter>,
    industry: IndustryCode,
    hints_enabled: bool,
}

impl SessionConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if no standard or no chapter is given
    pub fn new(
        standards: Vec<StandardCode>,
        audit_type: AuditType,
        difficulty: Difficulty,
        chapters: Vec<AnnexChapter>,
        industry: IndustryCode,
        hints_enabled: bool,
    ) -> Result<Self, ValidationError> {
        let mut standards = standards;
        standards.sort();
        standards.dedup();
        if standards.is_empty() {
            return Err(ValidationError::empty_field("standards"));
        }

        let mut chapters = chapters;
        chapters.sort();
        chapters.dedup();
        if chapters.is_empty() {
            return Err(ValidationError::empty_field("chapters"));
        }

        Ok(Self {
            standards,
            audit_type,
            difficulty,
            chapters,
            industry,
            hints_enabled,
        })
    }

    pub fn standards(&self) -> &[StandardCode] {
        &self.standards
    }

    pub fn audit_type(&self) -> AuditType {
        self.audit_type
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn chapters(&self) -> &[AnnexChapter] {
        &self.chapters
    }

    pub fn industry(&self) -> IndustryCode {
        self.industry
    }

    pub fn hints_enabled(&self) -> bool {
        self.hints_enabled
    }

    /// True when more than one standard is audited together.
    pub fn is_multi_standard(&self) -> bool {
        self.standards.len() > 1
    }

    pub fn includes(&self, standard: StandardCode) -> bool {
        self.standards.contains(&standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters(numbers: &[u8]) -> Vec<AnnexChapter> {
        numbers.iter().map(|n| AnnexChapter::new(*n).unwrap()).collect()
    }

    #[test]
    fn audit_type_parses_known_codes() {
        assert_eq!("intern".parse::<AuditType>().unwrap(), AuditType::Internal);
        assert_eq!("extern".parse::<AuditType>().unwrap(), AuditType::SecondParty);
        assert_eq!("certifiering".parse::<AuditType>().unwrap(), AuditType::Certification);
        assert_eq!("overvakning".parse::<AuditType>().unwrap(), AuditType::Surveillance);
    }

    #[test]
    fn audit_type_rejects_unknown_code_strictly() {
        assert!("tredjepart".parse::<AuditType>().is_err());
    }

    #[test]
    fn audit_type_lenient_lookup_falls_back_to_certification() {
        assert_eq!(AuditType::from_code_or_default("tredjepart"), AuditType::Certification);
        assert_eq!(AuditType::from_code_or_default("intern"), AuditType::Internal);
    }

    #[test]
    fn industry_defaults_to_manufacturing() {
        assert_eq!(IndustryCode::default(), IndustryCode::Manufacturing);
        assert_eq!(IndustryCode::from_code_or_default("shipping"), IndustryCode::Manufacturing);
        assert_eq!(IndustryCode::from_code_or_default("food"), IndustryCode::Food);
    }

    #[test]
    fn chapter_must_be_within_annex_range() {
        assert!(AnnexChapter::new(3).is_err());
        assert!(AnnexChapter::new(11).is_err());
        assert_eq!(AnnexChapter::new(7).unwrap().number(), 7);
    }

    #[test]
    fn chapter_deserializes_through_validation() {
        assert!(serde_json::from_str::<AnnexChapter>("8").is_ok());
        assert!(serde_json::from_str::<AnnexChapter>("12").is_err());
    }

    #[test]
    fn config_deduplicates_and_sorts() {
        let config = SessionConfig::new(
            vec![StandardCode::Iso14001, StandardCode::Iso9001, StandardCode::Iso14001],
            AuditType::Internal,
            Difficulty::Basic,
            chapters(&[9, 4, 9]),
            IndustryCode::Food,
            true,
        )
        .unwrap();

        assert_eq!(config.standards(), &[StandardCode::Iso9001, StandardCode::Iso14001]);
        assert_eq!(config.chapters(), chapters(&[4, 9]).as_slice());
        assert!(config.is_multi_standard());
    }

    #[test]
    fn config_rejects_empty_standards() {
        let result = SessionConfig::new(
            vec![],
            AuditType::Internal,
            Difficulty::Basic,
            chapters(&[4]),
            IndustryCode::Manufacturing,
            true,
        );
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn config_rejects_empty_chapters() {
        let result = SessionConfig::new(
            vec![StandardCode::Iso9001],
            AuditType::Internal,
            Difficulty::Basic,
            vec![],
            IndustryCode::Manufacturing,
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn codes_serialize_as_wire_strings() {
        assert_eq!(serde_json::to_string(&Difficulty::Advanced).unwrap(), "\"avancerad\"");
        assert_eq!(serde_json::to_string(&StandardCode::Iatf16949).unwrap(), "\"iatf16949\"");
        assert_eq!(serde_json::to_string(&AuditType::Surveillance).unwrap(), "\"overvakning\"");
    }
}
