//! Audit-type framings and meeting attendance rules.

use super::industries::{Character, IndustryProfile, StaffRole};
use crate::domain::session::AuditType;

/// Placeholder replaced with the simulated company's name.
pub const COMPANY_PLACEHOLDER: &str = "{company}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditTypeProfile {
    /// Tone and formality block for the chat directive.
    pub framing: &'static str,
    pub greeting: &'static str,
    pub opening_context: &'static str,
    pub opening_roles: &'static [StaffRole],
    pub closing_roles: &'static [StaffRole],
    /// Whether affected process owners join the meetings as a group.
    pub process_owners_attend: bool,
}

impl AuditTypeProfile {
    pub fn greeting_for(&self, company: &str) -> String {
        self.greeting.replace(COMPANY_PLACEHOLDER, company)
    }
}

pub fn audit_type_profile(audit_type: AuditType) -> &'static AuditTypeProfile {
    match audit_type {
        AuditType::Internal => &INTERNAL,
        AuditType::SecondParty => &SECOND_PARTY,
        AuditType::Certification => &CERTIFICATION,
        AuditType::Surveillance => &SURVEILLANCE,
    }
}

/// Attendee lines ("Namn (Titel)") for the given roles, skipping roles the
/// industry roster does not have.
pub fn attendee_lines(
    profile: &IndustryProfile,
    roles: &[StaffRole],
    process_owners_attend: bool,
) -> Vec<String> {
    let mut lines: Vec<String> = roles
        .iter()
        .filter_map(|role| profile.find_role(*role))
        .map(attendee_label)
        .collect();
    if process_owners_attend {
        lines.push("Berörda processägare".to_string());
    }
    lines
}

fn attendee_label(character: &Character) -> String {
    format!("{} ({})", character.name, character.title)
}

static INTERNAL: AuditTypeProfile = AuditTypeProfile {
    framing: "\
Detta är en INTERN REVISION (första part).
Revisorn är från samma organisation men granskar en annan avdelning.
Tonen kan vara mer informell, men revisorn ska fortfarande vara professionell.
Fokus är på förbättring snarare än certifiering.",
    greeting: "Välkommen till startmötet för vår interna revision.",
    opening_context: "Som ni vet genomför vi regelbundna internrevisioner för att säkerställa att \
vårt ledningssystem fungerar effektivt och att vi fortsätter förbättra oss.",
    opening_roles: &[StaffRole::QualityManager, StaffRole::ProductionManager],
    closing_roles: &[StaffRole::QualityManager],
    process_owners_attend: true,
};

static SECOND_PARTY: AuditTypeProfile = AuditTypeProfile {
    framing: "\
Detta är en EXTERN REVISION (andra part) - leverantörsrevision.
Revisorn representerar en kund som granskar företaget som leverantör.
Fokus på leverantörskvalificering och kundspecifika krav.
Företaget vill visa sig från sin bästa sida men ska vara ärliga.",
    greeting: "Välkommen till {company} för denna leverantörsrevision.",
    opening_context: "Vi förstår att denna revision är en del av ert arbete med att kvalificera \
och följa upp era leverantörer. Vi ser fram emot att visa hur vi arbetar.",
    opening_roles: &[
        StaffRole::QualityManager,
        StaffRole::ChiefExecutive,
        StaffRole::ProductionManager,
        StaffRole::PurchasingManager,
    ],
    closing_roles: &[
        StaffRole::ChiefExecutive,
        StaffRole::QualityManager,
        StaffRole::ProductionManager,
    ],
    process_owners_attend: false,
};

static CERTIFICATION: AuditTypeProfile = AuditTypeProfile {
    framing: "\
Detta är en CERTIFIERINGSREVISION (tredje part) - initial certifiering.
Revisorn är från ett certifieringsorgan.
Detta är en formell revision där företaget vill bli certifierat.
Alla krav i standarden ska verifieras. Fokus på systemets fullständighet.",
    greeting: "Välkommen till {company} för certifieringsrevisionen.",
    opening_context: "Vi har förberett oss noga för denna revision och ser fram emot att \
demonstrera vårt ledningssystem. All dokumentation finns tillgänglig och berörda medarbetare \
är informerade.",
    opening_roles: &[
        StaffRole::ChiefExecutive,
        StaffRole::QualityManager,
        StaffRole::ProductionManager,
        StaffRole::HseManager,
        StaffRole::PurchasingManager,
    ],
    closing_roles: &[
        StaffRole::ChiefExecutive,
        StaffRole::QualityManager,
        StaffRole::ProductionManager,
        StaffRole::PurchasingManager,
        StaffRole::HseManager,
    ],
    process_owners_attend: false,
};

static SURVEILLANCE: AuditTypeProfile = AuditTypeProfile {
    framing: "\
Detta är en ÖVERVAKNINGSREVISION (tredje part) - årlig uppföljning.
Revisorn är från certifieringsorganet som utfärdade certifikatet.
Fokus på förändringar sedan senaste revision och korrigerande åtgärder.
Stickprovsgranskning av utvalda områden.",
    greeting: "Välkommen tillbaka till {company} för årets övervakningsrevision.",
    opening_context: "Sedan förra revisionen har vi arbetat med de korrigerande åtgärderna och \
fortsatt utveckla vårt ledningssystem.",
    opening_roles: &[
        StaffRole::QualityManager,
        StaffRole::ChiefExecutive,
        StaffRole::ProductionManager,
    ],
    closing_roles: &[StaffRole::QualityManager, StaffRole::ChiefExecutive],
    process_owners_attend: true,
};
