//! Opening-meeting welcome shown when a session is created.

use crate::domain::knowledge::{
    attendee_lines, audit_type_profile, chapter_reference, industry_profile,
};
use crate::domain::session::SessionConfig;

/// Renders the welcome in the voice of the industry's quality manager.
///
/// Deterministic: no clock or randomness, so the same configuration always
/// yields the same text.
pub fn opening_welcome(config: &SessionConfig) -> String {
    let industry = industry_profile(config.industry());
    let company = &industry.company;
    let host = industry.quality_manager();
    let audit = audit_type_profile(config.audit_type());

    let attendees = attendee_lines(industry, audit.opening_roles, audit.process_owners_attend);
    let standards = config
        .standards()
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    let chapters = config
        .chapters()
        .iter()
        .map(|c| {
            let reference = chapter_reference(*c);
            format!("   • Kapitel {}: {}", reference.number, reference.title)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut practical = vec![
        "Lunch serveras kl 12:00".to_string(),
        "Kaffe och fika finns tillgängligt".to_string(),
    ];
    practical.extend(industry.visitor_rules.iter().map(|r| r.to_string()));

    format!(
        "*{host_name}, {host_title}:*\n\n\
         {greeting}\n\n\
         {context}\n\n\
         **Närvarande från {company_name}:**\n\
         {attendees}\n\n\
         **Om företaget:**\n\
         {description}\n\n\
         Vi har {employees} anställda i {location} och är certifierade enligt {certifications}.\n\n\
         **Revision avser:**\n\
         • Standard: {standards}\n\
         • Fokusområden:\n\
         {chapters}\n\n\
         **Praktisk information:**\n\
         {practical}\n\n\
         Vi har bokat intervjutider med berörda medarbetare och dokumentationen finns förberedd.\n\n\
         ---\n\n\
         *{host_name}:*\n\n\
         Vi lämnar nu över till er för att presentera er och gå igenom revisionsplanen. \
         Hur vill ni lägga upp dagen?",
        host_name = host.name,
        host_title = host.title,
        greeting = audit.greeting_for(company.name),
        context = audit.opening_context,
        company_name = company.name,
        attendees = dotted(attendees.iter()),
        description = company.description,
        employees = company.employees,
        location = company.location,
        certifications = company.certifications.join(", "),
        standards = standards,
        chapters = chapters,
        practical = dotted(practical.iter()),
    )
}

fn dotted<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(|item| format!("• {item}")).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{AnnexChapter, AuditType, Difficulty, IndustryCode, StandardCode};

    fn config(audit_type: AuditType, industry: IndustryCode) -> SessionConfig {
        SessionConfig::new(
            vec![StandardCode::Iso9001, StandardCode::Iso14001],
            audit_type,
            Difficulty::Basic,
            vec![AnnexChapter::new(9).unwrap(), AnnexChapter::new(4).unwrap()],
            industry,
            true,
        )
        .unwrap()
    }

    #[test]
    fn spoken_by_quality_manager() {
        let text = opening_welcome(&config(AuditType::Certification, IndustryCode::Construction));
        assert!(text.starts_with("*Peter Lindgren, Kvalitets- och miljöchef:*"));
        assert!(text.contains("Välkommen till Nordbygg Entreprenad AB för certifieringsrevisionen."));
    }

    #[test]
    fn lists_standards_and_sorted_chapters() {
        let text = opening_welcome(&config(AuditType::Internal, IndustryCode::Manufacturing));
        assert!(text.contains("ISO 9001:2015 (Kvalitet), ISO 14001:2015 (Miljö)"));
        let four = text.find("Kapitel 4: Organisationens förutsättningar").unwrap();
        let nine = text.find("Kapitel 9: Utvärdering av prestanda").unwrap();
        assert!(four < nine);
    }

    #[test]
    fn attendees_follow_audit_type() {
        let text = opening_welcome(&config(AuditType::Internal, IndustryCode::Manufacturing));
        assert!(text.contains("• Erik Johansson (Kvalitetschef)"));
        assert!(text.contains("• Berörda processägare"));
        assert!(!text.contains("Anna Lindqvist (VD)"));
    }

    #[test]
    fn food_visitors_get_hygiene_rules() {
        let text = opening_welcome(&config(AuditType::SecondParty, IndustryCode::Food));
        assert!(text.contains("Hygienklädsel"));
    }

    #[test]
    fn is_deterministic() {
        let cfg = config(AuditType::Surveillance, IndustryCode::Manufacturing);
        assert_eq!(opening_welcome(&cfg), opening_welcome(&cfg));
    }
}
