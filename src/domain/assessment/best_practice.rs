//! Best-practice comparison of the auditor's questions.

use serde::{Deserialize, Serialize};

use super::parser::{extract_json_array, AssessmentParseError};
use crate::domain::knowledge::{chapter_practices, interview_techniques};
use crate::domain::session::AnnexChapter;

/// Most examples kept from one reply.
pub const MAX_BEST_PRACTICE_EXAMPLES: usize = 5;

pub const BEST_PRACTICE_SYSTEM_DIRECTIVE: &str = "\
Du är en erfaren revisionsmentor som jämför revisorers frågor med best practice enligt ISO 19011.
Svara ENDAST med en JSON-array.";

/// One comparison between what the auditor asked and a stronger approach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPracticeExample {
    pub area: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_approach: Option<String>,
    pub optimal_approach: String,
    pub technique: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_reference: Option<String>,
    pub explanation: String,
}

/// Request for 3-5 comparison examples.
pub fn best_practice_prompt(auditor_questions: &[&str], chapters: &[AnnexChapter]) -> String {
    let questions = auditor_questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n");
    let references = chapters
        .iter()
        .flat_map(|c| chapter_practices(*c).iter())
        .map(|p| {
            format!(
                "- **{}**: {} (Teknik: {}, {})",
                p.area, p.optimal_approach, p.technique, p.iso_reference
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let techniques = interview_techniques()
        .iter()
        .map(|t| format!("- **{}**: {} Används: {}", t.name, t.description, t.when_to_use))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## BEST PRACTICE-ANALYS\n\n\
         Analysera revisorns frågor under sessionen och jämför med best practice.\n\n\
         ### REVISORNS FRÅGOR\n{questions}\n\n\
         ### BEST PRACTICE-REFERENS\n{references}\n\n\
         ### INTERVJUTEKNIKER\n{techniques}\n\n\
         ### INSTRUKTIONER\n\
         Skapa en JSON-array med 3-5 best practice-exempel. För varje exempel:\n\
         1. Identifiera ett område där revisorn kunde förbättras\n\
         2. Citera (eller parafrasera) revisorns faktiska fråga om den finns\n\
         3. Visa den optimala frågeställningen\n\
         4. Nämn vilken intervjuteknik som rekommenderas\n\
         5. Ge en kort förklaring\n\n\
         Svara ENDAST med JSON i detta format:\n\
         [\n  {{\n\
         \x20   \"area\": \"Kompetens\",\n\
         \x20   \"topic\": \"Utbildningsverifiering\",\n\
         \x20   \"userApproach\": \"Har ni utbildning?\",\n\
         \x20   \"optimalApproach\": \"Hur säkerställer ni att operatören har rätt kompetens? Visa mig kompetensmatrisen.\",\n\
         \x20   \"technique\": \"Visa mig + Triangulering\",\n\
         \x20   \"isoReference\": \"ISO 9001:2015 7.2\",\n\
         \x20   \"explanation\": \"Frågan var för bred och ledde inte till verifierbara bevis.\"\n\
         \x20 }}\n]"
    )
}

/// Parses the comparison reply, keeping at most five examples.
pub fn parse_best_practice(raw: &str) -> Result<Vec<BestPracticeExample>, AssessmentParseError> {
    let json = extract_json_array(raw).ok_or(AssessmentParseError::NotFound("array"))?;
    let mut examples: Vec<BestPracticeExample> =
        serde_json::from_str(json).map_err(|e| AssessmentParseError::Malformed(e.to_string()))?;
    if examples.is_empty() {
        return Err(AssessmentParseError::Empty);
    }
    examples.truncate(MAX_BEST_PRACTICE_EXAMPLES);
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_json(area: &str) -> String {
        format!(
            r#"{{"area": "{area}", "topic": "t", "optimalApproach": "o", "technique": "Visa mig", "explanation": "e"}}"#
        )
    }

    #[test]
    fn prompt_numbers_questions_and_lists_references() {
        let chapters = [AnnexChapter::new(7).unwrap()];
        let prompt = best_practice_prompt(&["Har ni utbildning?", "Visa kalibrering"], &chapters);
        assert!(prompt.contains("1. Har ni utbildning?\n2. Visa kalibrering"));
        assert!(prompt.contains("**Kompetens**"));
        assert!(prompt.contains("**Tratt-tekniken**"));
        assert!(prompt.contains("\"optimalApproach\""));
    }

    #[test]
    fn parses_array_in_prose() {
        let raw = format!("Här: [{}, {}] klart", example_json("A"), example_json("B"));
        let examples = parse_best_practice(&raw).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].area, "A");
        assert!(examples[0].user_approach.is_none());
    }

    #[test]
    fn keeps_at_most_five() {
        let items = (0..7).map(|i| example_json(&i.to_string())).collect::<Vec<_>>();
        let raw = format!("[{}]", items.join(","));
        assert_eq!(parse_best_practice(&raw).unwrap().len(), MAX_BEST_PRACTICE_EXAMPLES);
    }

    #[test]
    fn empty_array_is_rejected() {
        assert_eq!(parse_best_practice("[]").unwrap_err(), AssessmentParseError::Empty);
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let raw = r#"[{"area": "A"}]"#;
        assert!(matches!(
            parse_best_practice(raw).unwrap_err(),
            AssessmentParseError::Malformed(_)
        ));
    }
}
