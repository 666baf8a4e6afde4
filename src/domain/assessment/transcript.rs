use crate::domain::dialogue::chapter_list;
use crate::domain::session::{Message, SessionConfig};

/// Renders the configuration header and the ordered dialogue for grading.
pub fn render_transcript(config: &SessionConfig, messages: &[Message]) -> String {
    let standards = config
        .standards()
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    let turns = messages
        .iter()
        .map(|m| format!("{}: {}", m.author.transcript_label(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Sessionskonfiguration:\n\
         - Standard: {standards}\n\
         - Revisionstyp: {}\n\
         - Svårighetsgrad: {}\n\
         - Annex SL-kapitel: {}\n\n\
         Konversation:\n{turns}",
        config.audit_type().display_name(),
        config.difficulty().display_name(),
        chapter_list(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::session::{
        AnnexChapter, AuditType, Difficulty, IndustryCode, NewMessage, StandardCode,
    };

    #[test]
    fn labels_turns_in_order() {
        let config = SessionConfig::new(
            vec![StandardCode::Iso9001],
            AuditType::Internal,
            Difficulty::Basic,
            vec![AnnexChapter::new(5).unwrap(), AnnexChapter::new(8).unwrap()],
            IndustryCode::Manufacturing,
            false,
        )
        .unwrap();
        let session_id = SessionId::new();
        let messages = vec![
            Message::from_new(session_id, NewMessage::auditor("Hej").unwrap(), 1),
            Message::from_new(session_id, NewMessage::company("Välkommen").unwrap(), 2),
        ];

        let transcript = render_transcript(&config, &messages);

        assert!(transcript.starts_with("Sessionskonfiguration:\n- Standard: ISO 9001:2015 (Kvalitet)"));
        assert!(transcript.contains("- Annex SL-kapitel: 5, 8"));
        assert!(transcript.ends_with("Konversation:\nREVISOR: Hej\n\nFÖRETAG: Välkommen"));
    }
}
