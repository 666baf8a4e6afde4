//! Chat directive composition.
//!
//! `compose_directive` assembles the system directive for one chat turn from
//! the session configuration, the static knowledge tables and the detected
//! turn context. Layers are appended in a fixed order and never replace an
//! earlier layer:
//!
//! 1. base role-play framing
//! 2. company context and character roster
//! 3. audit-type framing
//! 4. standards, difficulty and chapter content (plus interaction rules and,
//!    in the opening phase, the opening-meeting expectations)
//! 5. multi-standard overlay (more than one standard selected)
//! 6. closing-meeting overlay (current message asks for it)
//! 7. consistency contract (plus a progress note for long sessions)
//!
//! The output depends only on its inputs.

use crate::domain::knowledge::{
    attendee_lines, audit_type_profile, calibrated_findings, chapter_reference,
    difficulty_profile, industry_profile, is_closing_meeting_request, standard_overlay,
    IndustryProfile, CLOSING_REACTION_RULES, INTEGRATED_COMMON_ELEMENTS, INTEGRATED_LINKS,
    INTEGRATED_SYSTEM_GAPS,
};
use crate::domain::session::{auditor_message_count, Message, SessionConfig};

use super::phase::{detect_phase, Phase};

/// Message count from which a progress note is appended.
pub const PROGRESS_NOTE_THRESHOLD: usize = 10;

/// Per-turn inputs derived from the history and the incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub phase: Phase,
    /// Whether the current auditor message asks for the closing meeting.
    pub closing_requested: bool,
    pub message_count: usize,
    pub auditor_messages: usize,
}

impl TurnContext {
    /// Builds the context for a turn. `history` already contains the
    /// current message when it has been persisted.
    pub fn for_turn(history: &[Message], current_message: &str) -> Self {
        Self {
            phase: detect_phase(history),
            closing_requested: is_closing_meeting_request(current_message),
            message_count: history.len(),
            auditor_messages: auditor_message_count(history),
        }
    }
}

/// Composes the full chat directive.
pub fn compose_directive(config: &SessionConfig, turn: &TurnContext) -> String {
    let industry = industry_profile(config.industry());

    let mut layers = vec![
        base_framing(industry),
        company_context(industry),
        character_roster(industry),
        audit_context(config),
        chapter_content(config, industry),
        interaction_rules(industry),
    ];

    if turn.phase == Phase::Opening {
        layers.push(opening_guidance(config, industry));
    }
    if config.is_multi_standard() {
        layers.push(multi_standard_overlay(config, industry));
    }
    if turn.closing_requested {
        layers.push(closing_overlay(config, industry));
    }
    layers.push(CONSISTENCY_CONTRACT.to_string());
    if turn.message_count >= PROGRESS_NOTE_THRESHOLD {
        layers.push(progress_note(turn));
    }
    layers.push(RESPONSE_FORMAT.to_string());

    layers.join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Layers
// ────────────────────────────────────────────────────────────────────────────

fn base_framing(industry: &IndustryProfile) -> String {
    let company = industry.company.name;
    format!(
        "# SYSTEMINSTRUKTION: Revisionsträningssimulator\n\n\
         Du är en AI-simulator för träning av ledningssystemsrevisorer. Du agerar som \
         representanter för det fiktiva företaget {company} och blir reviderad av användaren.\n\n\
         ## DIN ROLL\n\n\
         Du spelar ALLA roller på företaget {company}. Varje karaktär har unik personlighet, \
         kunskap och begränsningar. Du är ALDRIG revisor, du spelar endast företagets personal."
    )
}

fn company_context(industry: &IndustryProfile) -> String {
    let company = &industry.company;
    let mut out = format!(
        "## FÖRETAGSKONTEXT: {}\n\n\
         ### Grundinformation\n\
         - Bransch: {}\n\
         - Anställda: {} personer\n\
         - Ort: {}\n\
         - {}\n\
         - Produkter: {}\n\
         - Certifieringar: {}\n\
         - Anläggningar: {}\n\
         - Kunder: {}",
        company.name,
        company.industry,
        company.employees,
        company.location,
        company.description,
        company.products.join(", "),
        company.certifications.join(", "),
        company.facilities.join(", "),
        company.customers.join(", "),
    );

    if !industry.sector_standards.is_empty() {
        out.push_str("\n\n### Branschstandarder\n");
        out.push_str(&bullets(
            industry
                .sector_standards
                .iter()
                .map(|(code, name)| format!("**{code}**: {name}")),
        ));
    }
    if !industry.terminology.is_empty() {
        out.push_str("\n\n### Branschterminologi\n");
        out.push_str(&bullets(
            industry
                .terminology
                .iter()
                .map(|(term, meaning)| format!("**{term}**: {meaning}")),
        ));
    }
    out
}

fn character_roster(industry: &IndustryProfile) -> String {
    let mut out = String::from("## KARAKTÄRER\n");
    for character in industry.characters {
        out.push_str(&format!(
            "\n### {}, {}\n\
             - År i företaget: {}\n\
             - Personlighet: {}\n\
             - Expertis: {}\n\
             - Begränsningar: {}\n",
            character.name,
            character.title,
            character.years_at_company,
            character.personality,
            character.expertise.join("; "),
            character.limitations.join("; "),
        ));
    }
    let host = industry.quality_manager();
    out.push_str(&format!(
        "\nByt karaktär när frågan hör till någon annans område. Om en karaktär inte kan svara, \
         hänvisa till rätt person.\n\n\
         **VIKTIGT:** Ange alltid vilken roll du talar som: \"*{}, {}:*\"",
        host.name, host.title
    ));
    out
}

fn audit_context(config: &SessionConfig) -> String {
    let profile = audit_type_profile(config.audit_type());
    let standards = config
        .standards()
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "## REVISIONSKONTEXT\n\n{}\n\n\
         **Standard(er) som revideras:** {}\n\
         **Fokusområden (Annex SL-kapitel):** {}",
        profile.framing,
        standards,
        chapter_list(config),
    )
}

fn chapter_content(config: &SessionConfig, industry: &IndustryProfile) -> String {
    let difficulty = difficulty_profile(config.difficulty());
    let mut out = format!(
        "## SVÅRIGHETSGRAD: {}\n\n{}\n\n## ANNEX SL-STRUKTUR OCH INNEHÅLL",
        difficulty.label, difficulty.finding_complexity
    );

    for chapter in config.chapters() {
        let reference = chapter_reference(*chapter);
        out.push_str(&format!(
            "\n\n## Kapitel {}: {}\n{}\n\n### Typiska fynd för denna nivå ({}):\n{}",
            reference.number,
            reference.title,
            reference.content,
            config.difficulty().display_name(),
            bullets(
                calibrated_findings(*chapter, config.difficulty())
                    .iter()
                    .map(|f| f.to_string())
            ),
        ));
    }

    if industry.uses_reference_documents {
        out.push_str(
            "\n\n### Dokumentation att \"visa\"\n\
             När revisorn ber om dokument, VISA dem formaterade som tabeller med rubrik, \
             dokumentnummer och revision. Använd dessa dokument:\n",
        );
        for chapter in config.chapters() {
            let reference = chapter_reference(*chapter);
            for doc in reference.documents {
                out.push_str(&format!(
                    "\n- {}: {} ({}, Rev {}, {})",
                    doc.id, doc.title, doc.kind, doc.revision, doc.date
                ));
                if let Some(warning) = doc.warning {
                    out.push_str(&format!(" - ⚠️ {warning}"));
                }
            }
        }
    }
    out
}

fn interaction_rules(industry: &IndustryProfile) -> String {
    let host = industry.quality_manager();
    format!(
        "## REGLER FÖR INTERAKTION\n\n\
         ### Under revisionen\n\
         1. **Svara realistiskt** - Ge svar som en verklig person i rollen skulle ge\n\
         2. **Var konsekvent** - Kom ihåg vad du sagt tidigare i sessionen\n\
         3. **Anpassa detaljnivå** - Vaga frågor ger vaga svar, specifika frågor ger specifika svar\n\
         4. **Inkludera avvikelser** - Väv in realistiska brister enligt svårighetsgraden\n\
         5. **Visa dokument** - Om revisorn ber om dokument, beskriv dem eller visa relevanta utdrag\n\
         6. **Reagera naturligt** - Om revisorn hittar en avvikelse, reagera professionellt\n\n\
         ### Avslut\n\
         Om revisorn indikerar att revisionen är klar förbereder {} slutmötet och lyssnar på \
         revisorns sammanfattning av fynd.\n\n\
         ## VIKTIGT\n\
         - Avslöja inte avsiktligt avvikelser, låt revisorn upptäcka dem genom bra frågor\n\
         - Om revisorn gör ett bra jobb, låt det framgå subtilt genom mer samarbetsvilliga svar\n\
         - Om revisorn missar uppenbara följdfrågor, ge inte svaren gratis",
        host.name
    )
}

fn opening_guidance(config: &SessionConfig, industry: &IndustryProfile) -> String {
    let host = industry.quality_manager();
    let profile = audit_type_profile(config.audit_type());
    let attendees = attendee_lines(industry, profile.opening_roles, profile.process_owners_attend);
    format!(
        "## STARTMÖTE (PÅGÅR)\n\n\
         Sessionen har börjat med ett startmöte där {name} har hälsat välkommen och \
         presenterat företaget.\n\
         Närvarande: {attendees}\n\n\
         **Revisorn förväntas nu:**\n\
         1. Presentera sig själv (namn, organisation, roll)\n\
         2. Bekräfta revisionens syfte och omfattning\n\
         3. Gå igenom revisionsplanen och tidschema\n\
         4. Bekräfta vilka som ska intervjuas\n\
         5. Förklara hur fynd kommer att rapporteras\n\
         6. Fråga om det finns några frågor\n\n\
         **Om revisorn hoppar över presentationen:**\n\
         - {name} kan artigt be om en kort presentation: \"Innan vi börjar, kan ni kanske \
         presentera er och berätta lite om hur ni har tänkt lägga upp dagen?\"\n\n\
         **Om revisorn går direkt på sakfrågor:**\n\
         - Svara på frågorna, men notera internt att startmötet inte genomfördes fullständigt",
        name = host.name,
        attendees = attendees.join(", "),
    )
}

fn multi_standard_overlay(config: &SessionConfig, industry: &IndustryProfile) -> String {
    let company = industry.company.name;
    let mut out = String::from("## MULTISTANDARD-REVISION");

    for standard in config.standards() {
        let Some(overlay) = standard_overlay(*standard) else {
            continue;
        };
        out.push_str(&format!("\n\n### {}\n", overlay.heading));
        out.push_str(&bullets(overlay.facts.iter().map(|f| f.to_string())));
        out.push_str(&format!("\n\n#### Dokumentation {}\n", standard.short_name()));
        out.push_str(&bullets(overlay.documents.iter().map(|d| d.to_string())));
        out.push_str(&format!("\n\n#### Potentiella avvikelser {}\n", standard.short_name()));
        out.push_str(&bullets(
            overlay
                .findings
                .iter()
                .map(|f| format!("{} (kap {}) {}: {}", f.id, f.chapter, f.requirement, f.deficiency)),
        ));
    }

    out.push_str(&format!(
        "\n\n### INTEGRERAT LEDNINGSSYSTEM\n\n\
         {company} har ett **integrerat ledningssystem** som kombinerar:\n{}\n\n\
         #### Gemensamma element (Annex SL)\n{}\n\n\
         #### Kopplingar mellan standarder\n{}\n\n\
         #### Potentiella systembrister vid kombinerad revision\n{}",
        bullets(config.standards().iter().map(|s| s.display_name().to_string())),
        bullets(INTEGRATED_COMMON_ELEMENTS.iter().map(|e| e.to_string())),
        bullets(INTEGRATED_LINKS.iter().map(|e| e.to_string())),
        bullets(INTEGRATED_SYSTEM_GAPS.iter().map(|e| e.to_string())),
    ));
    out
}

fn closing_overlay(config: &SessionConfig, industry: &IndustryProfile) -> String {
    let host = industry.quality_manager();
    let profile = audit_type_profile(config.audit_type());
    let attendees = attendee_lines(industry, profile.closing_roles, profile.process_owners_attend);
    format!(
        "## AKTIVT SLUTMÖTE\n\n\
         Revisorn har indikerat att de vill avsluta och hålla slutmöte. Använd följande format:\n\n\
         ---\n\
         **SLUTMÖTE**\n\
         *Närvarande: {attendees}*\n\
         ---\n\n\
         *{name}, {title}:*\n\n\
         Tack för att ni tog er tid att genomföra denna revision. Vi har samlat ledningen här \
         för att ta del av era iakttagelser och slutsatser. Vänligen presentera de fynd ni gjort, \
         både styrkor och eventuella avvikelser eller förbättringsområden.\n\n\
         {rules}",
        attendees = attendees.join(", "),
        name = host.name,
        title = host.title,
        rules = CLOSING_REACTION_RULES,
    )
}

fn progress_note(turn: &TurnContext) -> String {
    format!(
        "## SESSIONSSAMMANFATTNING\n\n\
         Denna session har {} meddelanden. Revisorn har ställt {} frågor. \
         Nuvarande fas: {}.\n\n\
         **VIKTIGT:** Läs igenom tidigare meddelanden så att nya svar är konsekventa med \
         etablerad information, visade dokument och granskade områden.",
        turn.message_count,
        turn.auditor_messages,
        turn.phase.label(),
    )
}

const CONSISTENCY_CONTRACT: &str = "\
## KONSEKVENT SESSIONSHANTERING

### Etablerade fakta
1. **Siffror och datum** - Om du sagt att något hände 2024-06-15, håll fast vid det
2. **Namn och titlar** - Använd samma namn för samma person
3. **Processdetaljer** - Beskriv en process likadant varje gång
4. **Dokumentstatus** - Om ett dokument sagts vara revision C, ändra inte det

### Konsekvensregler
- Om revisorn ber dig upprepa något, ge samma information
- Om revisorn hittar en motsägelse, erkänn det naturligt (\"Jag kanske uttryckte mig otydligt...\")
- Ändra aldrig spontant fakta som etablerats tidigare

### Dokumentkonsistens
- Samma dokumentnummer, samma revision och samma brister vid upprepade förfrågningar

### Tidskonsistens
- \"Idag\" är alltid samma dag under sessionen
- Kalibreringar, revisioner och möten har fasta datum

### Avvikelsekonsistens
- Avvikelserna finns där hela tiden, oavsett om revisorn upptäckt dem
- De kan inte \"lösas\" under revisionen";

const RESPONSE_FORMAT: &str = "\
## FORMAT

Svara alltid på svenska. Håll svaren lagom långa, som i ett verkligt samtal. Undvik att lista \
all information på en gång, låt revisorn driva samtalet framåt.";

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn bullets(items: impl Iterator<Item = String>) -> String {
    items.map(|item| format!("- {item}")).collect::<Vec<_>>().join("\n")
}

pub(crate) fn chapter_list(config: &SessionConfig) -> String {
    config
        .chapters()
        .iter()
        .map(|c| c.number().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{
        AnnexChapter, AuditType, Difficulty, IndustryCode, StandardCode,
    };

    fn config_with(
        standards: &[StandardCode],
        audit_type: AuditType,
        difficulty: Difficulty,
        chapters: &[u8],
        industry: IndustryCode,
    ) -> SessionConfig {
        SessionConfig::new(
            standards.to_vec(),
            audit_type,
            difficulty,
            chapters.iter().map(|n| AnnexChapter::new(*n).unwrap()).collect(),
            industry,
            true,
        )
        .unwrap()
    }

    fn basic_config() -> SessionConfig {
        config_with(
            &[StandardCode::Iso9001],
            AuditType::Certification,
            Difficulty::Medium,
            &[7],
            IndustryCode::Manufacturing,
        )
    }

    fn execution_turn() -> TurnContext {
        TurnContext {
            phase: Phase::Execution,
            closing_requested: false,
            message_count: 6,
            auditor_messages: 3,
        }
    }

    mod layering {
        use super::*;

        #[test]
        fn composition_is_deterministic() {
            let config = basic_config();
            let turn = execution_turn();
            assert_eq!(compose_directive(&config, &turn), compose_directive(&config, &turn));
        }

        #[test]
        fn layers_appear_in_fixed_order() {
            let directive = compose_directive(&basic_config(), &execution_turn());
            let base = directive.find("# SYSTEMINSTRUKTION").unwrap();
            let roster = directive.find("## KARAKTÄRER").unwrap();
            let audit = directive.find("## REVISIONSKONTEXT").unwrap();
            let chapters = directive.find("## Kapitel 7: Stöd").unwrap();
            let contract = directive.find("## KONSEKVENT SESSIONSHANTERING").unwrap();
            assert!(base < roster && roster < audit && audit < chapters && chapters < contract);
        }

        #[test]
        fn names_company_and_speaker_format() {
            let directive = compose_directive(&basic_config(), &execution_turn());
            assert!(directive.contains("Nordisk Precision AB"));
            assert!(directive.contains("\"*Erik Johansson, Kvalitetschef:*\""));
        }

        #[test]
        fn roster_follows_industry() {
            let config = config_with(
                &[StandardCode::Iso9001],
                AuditType::Internal,
                Difficulty::Basic,
                &[8],
                IndustryCode::Food,
            );
            let directive = compose_directive(&config, &execution_turn());
            assert!(directive.contains("Nordisk Livs AB"));
            assert!(directive.contains("### Lisa Ek, HACCP-koordinator"));
            assert!(!directive.contains("Nordisk Precision AB"));
        }
    }

    mod audit_type_framing {
        use super::*;

        #[test]
        fn each_audit_type_has_its_framing() {
            for (audit_type, marker) in [
                (AuditType::Internal, "INTERN REVISION"),
                (AuditType::SecondParty, "EXTERN REVISION"),
                (AuditType::Certification, "CERTIFIERINGSREVISION"),
                (AuditType::Surveillance, "ÖVERVAKNINGSREVISION"),
            ] {
                let config = config_with(
                    &[StandardCode::Iso9001],
                    audit_type,
                    Difficulty::Medium,
                    &[5],
                    IndustryCode::Manufacturing,
                );
                assert!(compose_directive(&config, &execution_turn()).contains(marker));
            }
        }

        #[test]
        fn unknown_audit_type_code_composes_as_certification() {
            let fallback = config_with(
                &[StandardCode::Iso9001],
                AuditType::from_code_or_default("tredjepart-special"),
                Difficulty::Medium,
                &[5],
                IndustryCode::Manufacturing,
            );
            let certification = config_with(
                &[StandardCode::Iso9001],
                AuditType::Certification,
                Difficulty::Medium,
                &[5],
                IndustryCode::Manufacturing,
            );
            let directive = compose_directive(&fallback, &execution_turn());
            assert!(directive.contains("CERTIFIERINGSREVISION"));
            assert_eq!(directive, compose_directive(&certification, &execution_turn()));
        }
    }

    mod difficulty_calibration {
        use super::*;

        #[test]
        fn basic_shows_fewer_findings_than_advanced() {
            let basic = config_with(
                &[StandardCode::Iso9001],
                AuditType::Certification,
                Difficulty::Basic,
                &[8],
                IndustryCode::Manufacturing,
            );
            let advanced = config_with(
                &[StandardCode::Iso9001],
                AuditType::Certification,
                Difficulty::Advanced,
                &[8],
                IndustryCode::Manufacturing,
            );
            let all = chapter_reference(AnnexChapter::new(8).unwrap()).typical_findings;
            let last = all[all.len() - 1];

            assert!(!compose_directive(&basic, &execution_turn()).contains(last));
            assert!(compose_directive(&advanced, &execution_turn()).contains(last));
        }

        #[test]
        fn reference_documents_only_for_manufacturing() {
            let manufacturing = compose_directive(&basic_config(), &execution_turn());
            let construction = compose_directive(
                &config_with(
                    &[StandardCode::Iso9001],
                    AuditType::Certification,
                    Difficulty::Medium,
                    &[7],
                    IndustryCode::Construction,
                ),
                &execution_turn(),
            );
            assert!(manufacturing.contains("DOC-007"));
            assert!(!construction.contains("DOC-007"));
        }
    }

    mod overlays {
        use super::*;

        #[test]
        fn single_standard_has_no_multi_standard_overlay() {
            let directive = compose_directive(&basic_config(), &execution_turn());
            assert!(!directive.contains("## MULTISTANDARD-REVISION"));
        }

        #[test]
        fn multi_standard_overlay_is_additive() {
            let single = compose_directive(&basic_config(), &execution_turn());
            let multi = compose_directive(
                &config_with(
                    &[StandardCode::Iso9001, StandardCode::Iso14001],
                    AuditType::Certification,
                    Difficulty::Medium,
                    &[7],
                    IndustryCode::Manufacturing,
                ),
                &execution_turn(),
            );
            assert!(multi.contains("## MULTISTANDARD-REVISION"));
            assert!(multi.contains("ENV-003"));
            assert!(multi.contains("INTEGRERAT LEDNINGSSYSTEM"));
            assert!(multi.contains("## Kapitel 7: Stöd"));
            assert!(single.contains("## Kapitel 7: Stöd"));
        }

        #[test]
        fn closing_overlay_only_when_requested() {
            let config = basic_config();
            let mut turn = execution_turn();
            assert!(!compose_directive(&config, &turn).contains("## AKTIVT SLUTMÖTE"));

            turn.closing_requested = true;
            let directive = compose_directive(&config, &turn);
            assert!(directive.contains("## AKTIVT SLUTMÖTE"));
            assert!(directive.contains("**SLUTMÖTE**"));
            assert!(directive.contains("Säg INGENTING"));
            assert!(directive.contains("Karl Pettersson (Miljö- och arbetsmiljöansvarig)"));
        }

        #[test]
        fn closing_overlay_precedes_consistency_contract() {
            let mut turn = execution_turn();
            turn.closing_requested = true;
            let directive = compose_directive(&basic_config(), &turn);
            assert!(
                directive.find("## AKTIVT SLUTMÖTE").unwrap()
                    < directive.find("## KONSEKVENT SESSIONSHANTERING").unwrap()
            );
        }

        #[test]
        fn opening_guidance_only_in_opening_phase() {
            let config = basic_config();
            let mut turn = execution_turn();
            assert!(!compose_directive(&config, &turn).contains("## STARTMÖTE (PÅGÅR)"));

            turn.phase = Phase::Opening;
            assert!(compose_directive(&config, &turn).contains("## STARTMÖTE (PÅGÅR)"));
        }

        #[test]
        fn progress_note_from_ten_messages() {
            let config = basic_config();
            let mut turn = execution_turn();
            assert!(!compose_directive(&config, &turn).contains("## SESSIONSSAMMANFATTNING"));

            turn.message_count = 12;
            turn.auditor_messages = 6;
            let directive = compose_directive(&config, &turn);
            assert!(directive.contains("Denna session har 12 meddelanden"));
            assert!(directive.contains("Revisorn har ställt 6 frågor"));
        }
    }

    mod turn_context {
        use super::*;
        use crate::domain::foundation::SessionId;
        use crate::domain::session::NewMessage;

        #[test]
        fn closing_flag_reads_current_message_only() {
            let session_id = SessionId::new();
            let history = vec![Message::from_new(
                session_id,
                NewMessage::auditor("Vi kan ha slutmöte senare").unwrap(),
                1,
            )];
            let turn = TurnContext::for_turn(&history, "Hur kalibrerar ni mätdon?");
            assert!(!turn.closing_requested);
            assert_eq!(turn.message_count, 1);
            assert_eq!(turn.auditor_messages, 1);
            assert_eq!(turn.phase, Phase::Opening);
        }
    }
}
