//! Mentor directives for hint requests.

use crate::domain::dialogue::{chapter_list, Phase};
use crate::domain::knowledge::chapter_hint_topics;
use crate::domain::session::SessionConfig;

use super::level::HintLevel;

/// Fixed system directive for the mentor persona answering hint requests.
pub const MENTOR_SYSTEM_DIRECTIVE: &str = "\
Du är en erfaren revisionsmentor som hjälper revisorer under träning.
Du ska ge hints och vägledning utan att förstöra inlärningsupplevelsen.
Anpassa dina svar till den begärda hint-nivån.";

/// What the hint directive is specialised on.
#[derive(Debug, Clone, Copy)]
pub struct HintContext<'a> {
    pub config: &'a SessionConfig,
    pub phase: Phase,
    pub message_count: usize,
}

/// Builds the hint request sent as the final user turn.
pub fn hint_directive(level: HintLevel, context: &HintContext<'_>) -> String {
    let difficulty = context.config.difficulty().display_name();
    let mut answer_format = String::from("💡 **Hint:** [Din ledtråd här]");
    if level >= HintLevel::Concrete {
        answer_format.push_str("\n\n**Varför:** [Förklaring av varför detta är relevant]");
    }
    if level >= HintLevel::Full {
        answer_format.push_str("\n\n**Standardkoppling:** [Relevant ISO-krav]");
    }

    format!(
        "## HINT-FÖRFRÅGAN (Nivå {number})\n\n\
         Revisorn har bett om hjälp. Analysera konversationen och ge en hint baserad på följande:\n\n\
         {instructions}\n\n\
         ### KONTEXT\n\
         - Valda Annex SL-kapitel: {chapters}\n\
         - Svårighetsgrad: {difficulty}\n\
         - Antal meddelanden: {count}\n\
         - Nuvarande fas: {phase}\n\n\
         ### FOKUSOMRÅDEN FÖR HINTS\n\
         {topics}\n\n\
         {phase_hints}\n\n\
         ### FORMAT\n\
         Svara som en mentor/coach. Använd formatet:\n\n\
         {answer_format}\n\n\
         Svara på svenska och anpassa nivån till svårighetsgraden {difficulty}.",
        number = level.number(),
        instructions = level.instructions(),
        chapters = chapter_list(context.config),
        count = context.message_count,
        phase = context.phase.label(),
        topics = chapter_topics(context.config),
        phase_hints = phase_hints(context.phase),
    )
}

fn chapter_topics(config: &SessionConfig) -> String {
    let sections: Vec<String> = config
        .chapters()
        .iter()
        .filter_map(|chapter| {
            let topics = chapter_hint_topics(*chapter);
            if topics.is_empty() {
                return None;
            }
            let lines = topics
                .iter()
                .map(|t| format!("  - {t}"))
                .collect::<Vec<_>>()
                .join("\n");
            Some(format!("**Kapitel {}:**\n{}", chapter.number(), lines))
        })
        .collect();

    if sections.is_empty() {
        "Generella revisionstekniker kan tillämpas.".to_string()
    } else {
        sections.join("\n\n")
    }
}

fn phase_hints(phase: Phase) -> &'static str {
    match phase {
        Phase::Opening => {
            "### STARTMÖTE-HINTS\n\
             - Har revisorn presenterat sig och sitt team?\n\
             - Har revisionsplanen bekräftats?\n\
             - Har praktiska frågor diskuterats (tidplan, resurser, lunch)?\n\
             - Har konfidentialitet och rapportering berörts?"
        }
        Phase::Execution => {
            "### REVISIONSUTFÖRANDE-HINTS\n\
             - Triangulering: Verifiera genom intervju + dokument + observation\n\
             - Följ processer från input till output\n\
             - Fråga \"Visa mig\" för konkreta bevis\n\
             - Sök efter kopplingar mellan olika krav"
        }
        Phase::Closing => {
            "### SLUTMÖTE-HINTS\n\
             - Har alla iakttagelser presenterats?\n\
             - Har företaget fått kommentera?\n\
             - Har korrigerande åtgärder diskuterats?\n\
             - Har nästa steg klargjorts?"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{AnnexChapter, AuditType, Difficulty, IndustryCode, StandardCode};

    fn config() -> SessionConfig {
        SessionConfig::new(
            vec![StandardCode::Iso9001],
            AuditType::Internal,
            Difficulty::Advanced,
            vec![AnnexChapter::new(7).unwrap(), AnnexChapter::new(10).unwrap()],
            IndustryCode::Manufacturing,
            true,
        )
        .unwrap()
    }

    fn context(config: &SessionConfig, phase: Phase) -> HintContext<'_> {
        HintContext {
            config,
            phase,
            message_count: 8,
        }
    }

    #[test]
    fn header_names_level() {
        let cfg = config();
        let text = hint_directive(HintLevel::Concrete, &context(&cfg, Phase::Execution));
        assert!(text.starts_with("## HINT-FÖRFRÅGAN (Nivå 2)"));
        assert!(text.contains("GE ETT KONKRET FÖRSLAG"));
    }

    #[test]
    fn includes_context_lines() {
        let cfg = config();
        let text = hint_directive(HintLevel::Subtle, &context(&cfg, Phase::Execution));
        assert!(text.contains("- Valda Annex SL-kapitel: 7, 10"));
        assert!(text.contains("- Svårighetsgrad: Avancerad"));
        assert!(text.contains("- Antal meddelanden: 8"));
        assert!(text.contains("- Nuvarande fas: Revisionsutförande"));
    }

    #[test]
    fn chapter_topics_are_listed() {
        let cfg = config();
        let text = hint_directive(HintLevel::Subtle, &context(&cfg, Phase::Execution));
        assert!(text.contains("**Kapitel 7:**"));
        assert!(text.contains("Grundorsaksanalys"));
    }

    #[test]
    fn phase_framing_differs() {
        let cfg = config();
        let opening = hint_directive(HintLevel::Subtle, &context(&cfg, Phase::Opening));
        let closing = hint_directive(HintLevel::Subtle, &context(&cfg, Phase::Closing));
        assert!(opening.contains("### STARTMÖTE-HINTS"));
        assert!(closing.contains("### SLUTMÖTE-HINTS"));
        assert!(!opening.contains("### SLUTMÖTE-HINTS"));
    }

    #[test]
    fn format_grows_with_level() {
        let cfg = config();
        let subtle = hint_directive(HintLevel::Subtle, &context(&cfg, Phase::Execution));
        let concrete = hint_directive(HintLevel::Concrete, &context(&cfg, Phase::Execution));
        let full = hint_directive(HintLevel::Full, &context(&cfg, Phase::Execution));

        assert!(!subtle.contains("**Varför:**"));
        assert!(concrete.contains("**Varför:**"));
        assert!(!concrete.contains("**Standardkoppling:**"));
        assert!(full.contains("**Standardkoppling:**"));
    }
}
