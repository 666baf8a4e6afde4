//! Industry profiles: simulated company facts and staff rosters.
//!
//! Each industry is one `IndustryProfile` value; there is no per-industry
//! behaviour, only data. Unknown industry codes resolve to manufacturing.

use crate::domain::session::IndustryCode;

/// Functional role a simulated staff member fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffRole {
    ChiefExecutive,
    QualityManager,
    ProductionManager,
    PurchasingManager,
    HseManager,
    MaintenanceManager,
    HaccpCoordinator,
    LabManager,
    WarehouseManager,
    LineOperator,
    ConstructionManager,
    SiteManager,
    ProjectManager,
    Supervisor,
}

/// One member of the simulated company's staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub name: &'static str,
    pub title: &'static str,
    pub role: StaffRole,
    pub years_at_company: u8,
    pub personality: &'static str,
    pub expertise: &'static [&'static str],
    /// Topics the character cannot answer and hands off instead.
    pub limitations: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyProfile {
    pub name: &'static str,
    pub industry: &'static str,
    pub employees: u16,
    pub location: &'static str,
    pub description: &'static str,
    pub products: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub facilities: &'static [&'static str],
    pub customers: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryProfile {
    pub code: IndustryCode,
    pub name: &'static str,
    pub company: CompanyProfile,
    /// Sector standards beyond the audited ones: (code, name).
    pub sector_standards: &'static [(&'static str, &'static str)],
    /// Domain vocabulary: (term, meaning).
    pub terminology: &'static [(&'static str, &'static str)],
    pub characters: &'static [Character],
    /// Whether the chapter reference documents (DOC-001..) belong to this company.
    pub uses_reference_documents: bool,
    /// Site-specific visitor rules announced at the opening meeting.
    pub visitor_rules: &'static [&'static str],
}

impl IndustryProfile {
    /// First staff member holding `role`.
    pub fn find_role(&self, role: StaffRole) -> Option<&'static Character> {
        self.characters.iter().find(|c| c.role == role)
    }

    /// The host of opening and closing meetings.
    pub fn quality_manager(&self) -> &'static Character {
        let roster: &'static [Character] = self.characters;
        self.find_role(StaffRole::QualityManager)
            .unwrap_or(&roster[0])
    }
}

/// Profile for a configured industry.
pub fn industry_profile(code: IndustryCode) -> &'static IndustryProfile {
    match code {
        IndustryCode::Manufacturing => &MANUFACTURING,
        IndustryCode::Food => &FOOD,
        IndustryCode::Construction => &CONSTRUCTION,
    }
}

/// Profile for a raw code, falling back to manufacturing.
pub fn industry_profile_by_code(code: &str) -> &'static IndustryProfile {
    industry_profile(IndustryCode::from_code_or_default(code))
}

// ════════════════════════════════════════════════════════════════════════════
// Manufacturing (fallback)
// ════════════════════════════════════════════════════════════════════════════

static MANUFACTURING: IndustryProfile = IndustryProfile {
    code: IndustryCode::Manufacturing,
    name: "Verkstad/Tillverkning",
    company: CompanyProfile {
        name: "Nordisk Precision AB",
        industry: "Tillverkande verkstadsindustri",
        employees: 180,
        location: "Västerås",
        description: "Tillverkare av precisionskomponenter för fordonsindustrin med fokus på \
                      hydrauliksystem och transmissioner. Grundat 1987, omsättning 285 MSEK.",
        products: &[
            "Precisionskomponenter för fordonsindustrin",
            "Hydrauliksystem",
            "Industriella transmissioner",
        ],
        certifications: &[
            "ISO 9001:2015",
            "ISO 14001:2015",
            "ISO 45001:2018",
            "IATF 16949:2016",
        ],
        facilities: &[
            "Produktionshall 1 (svarvning)",
            "Produktionshall 2 (fräsning)",
            "Monteringshall",
            "Mätrum",
            "Lager",
        ],
        customers: &["Volvo", "Scania", "Autoliv", "SKF"],
    },
    sector_standards: &[
        ("ISO 9001:2015", "Kvalitetsledning"),
        ("IATF 16949:2016", "Fordonsindustrins kvalitetsledning"),
    ],
    terminology: &[
        ("APQP", "Advanced Product Quality Planning"),
        ("PPAP", "Production Part Approval Process"),
        ("FMEA", "Failure Mode and Effects Analysis"),
        ("MSA", "Measurement System Analysis"),
        ("SPC", "Statistical Process Control"),
        ("Cpk", "Process Capability Index"),
    ],
    characters: &[
        Character {
            name: "Erik Johansson",
            title: "Kvalitetschef",
            role: StaffRole::QualityManager,
            years_at_company: 8,
            personality: "Metodisk, noggrann, diplomatisk. Lite stressad över alla pågående förbättringsprojekt.",
            expertise: &[
                "ISO 9001, ISO 14001, IATF 16949",
                "Internrevisioner och externa revisioner",
                "Avvikelsehantering och rotorsaksanalys",
            ],
            limitations: &[
                "Inte detaljkunskap om specifika produktionsprocesser",
                "Ekonomiska detaljer, hänvisar till ekonomichef",
            ],
        },
        Character {
            name: "Anna Lindqvist",
            title: "VD",
            role: StaffRole::ChiefExecutive,
            years_at_company: 15,
            personality: "Strategisk, resultatorienterad, karismatisk. Har bråttom.",
            expertise: &[
                "Övergripande affärsstrategi",
                "Ledningens engagemang och policy",
                "Investeringsbeslut",
            ],
            limitations: &[
                "Delegerar detaljfrågor till funktionschefer",
                "Känner inte till alla operativa detaljer",
            ],
        },
        Character {
            name: "Maria Svensson",
            title: "Produktionschef",
            role: StaffRole::ProductionManager,
            years_at_company: 12,
            personality: "Rak, praktisk, lösningsorienterad. Kan bli frustrerad över pappersarbete.",
            expertise: &[
                "Produktionsprocesser: svarvning, fräsning, svetsning",
                "Kapacitetsplanering och OEE",
                "Lean och förbättringsarbete",
            ],
            limitations: &[
                "Ledningssystemets dokumentation, hänvisar till Erik",
                "Konstruktionsdetaljer, hänvisar till konstruktion",
            ],
        },
        Character {
            name: "Lisa Bergström",
            title: "Inköpschef",
            role: StaffRole::PurchasingManager,
            years_at_company: 6,
            personality: "Analytisk, relationsbyggande, noggrann med avtal. Överarbetad just nu.",
            expertise: &[
                "Leverantörshantering och utvärdering",
                "Inköpsprocesser och avtal",
                "Supply chain och logistik",
            ],
            limitations: &[
                "Tekniska specifikationer, hänvisar till konstruktion",
                "Kvalitetskrav i detalj, samarbetar med Erik",
            ],
        },
        Character {
            name: "Karl Pettersson",
            title: "Miljö- och arbetsmiljöansvarig",
            role: StaffRole::HseManager,
            years_at_company: 5,
            personality: "Engagerad, ibland idealistisk. Vill göra mer än resurserna tillåter.",
            expertise: &[
                "ISO 14001 och miljöledning",
                "ISO 45001 och arbetsmiljö",
                "Kemikaliehantering och riskbedömningar",
            ],
            limitations: &[
                "Kvalitetsfrågor, samarbetar med Erik",
                "Produktionsdetaljer, hänvisar till Maria",
            ],
        },
        Character {
            name: "Per Nilsson",
            title: "Underhållschef",
            role: StaffRole::MaintenanceManager,
            years_at_company: 10,
            personality: "Lugn, metodisk, lite envis. Stolt över sin avdelning.",
            expertise: &[
                "Förebyggande och avhjälpande underhåll",
                "Kalibrering av mätutrustning",
                "Reservdelshantering",
            ],
            limitations: &[
                "Ledningssystemet, hänvisar till Erik",
                "IT-system",
            ],
        },
    ],
    uses_reference_documents: true,
    visitor_rules: &[
        "Skyddsutrustning tillhandahålls vid verkstadsbesök",
        "Vid eventuellt brandlarm, samling vid flaggstången på parkeringen",
    ],
};

// ════════════════════════════════════════════════════════════════════════════
// Food
// ════════════════════════════════════════════════════════════════════════════

static FOOD: IndustryProfile = IndustryProfile {
    code: IndustryCode::Food,
    name: "Livsmedel",
    company: CompanyProfile {
        name: "Nordisk Livs AB",
        industry: "Livsmedelsproduktion",
        employees: 145,
        location: "Jönköping",
        description: "Producent av kyld och fryst färdigmat för dagligvaruhandeln. Tillverkar \
                      färdigrätter, sallader och smörgåsar med fokus på svenska råvaror.",
        products: &[
            "Färdigrätter (kyld)",
            "Sallader och smörgåsar",
            "Fryst färdigmat",
            "Dressingar och såser",
        ],
        certifications: &["FSSC 22000", "ISO 9001:2015", "ISO 14001:2015", "BRC Food Safety"],
        facilities: &[
            "Produktionshall 1 (kylda produkter)",
            "Produktionshall 2 (frysta produkter)",
            "Råvarulager",
            "Färdigvarulager (kyl/frys)",
            "Kvalitetslaboratorium",
        ],
        customers: &["ICA", "Coop", "Axfood", "Bergendahls", "Foodservice"],
    },
    sector_standards: &[
        ("FSSC 22000", "Food Safety System Certification 22000"),
        ("ISO 22000:2018", "Livsmedelssäkerhet - Ledningssystem"),
        ("Codex HACCP", "Codex Alimentarius HACCP-principer"),
    ],
    terminology: &[
        ("CCP", "Critical Control Point - kritisk styrpunkt"),
        ("PRP", "Prerequisite Program - grundförutsättningsprogram"),
        ("OPRP", "Operativt grundförutsättningsprogram"),
        ("HACCP", "Faroanalys och kritiska styrpunkter"),
        ("MAP", "Förpackning med modifierad atmosfär"),
        ("FEFO", "Först utgånget först ut"),
        ("ATP", "Mäter biologisk kontamination vid hygienkontroll"),
        ("CoA", "Analysbevis från leverantör"),
    ],
    characters: &[
        Character {
            name: "Maria Lindberg",
            title: "Kvalitets- och livsmedelssäkerhetschef",
            role: StaffRole::QualityManager,
            years_at_company: 12,
            personality: "Strukturerad och detaljorienterad. Tar livsmedelssäkerhet på största allvar.",
            expertise: &["FSSC 22000 och ISO 22000", "HACCP-principer", "Allergenhantering"],
            limitations: &["Underhållsteknik, hänvisar till Johan Persson"],
        },
        Character {
            name: "Anders Bergström",
            title: "Produktionschef",
            role: StaffRole::ProductionManager,
            years_at_company: 8,
            personality: "Pragmatisk och lösningsorienterad. Prioriterar effektivitet men respekterar kvalitetskrav.",
            expertise: &["Produktionsplanering", "Hygienrutiner", "CCP-övervakning"],
            limitations: &["Laboratorieanalyser, hänvisar till Karin Nordin"],
        },
        Character {
            name: "Lisa Ek",
            title: "HACCP-koordinator",
            role: StaffRole::HaccpCoordinator,
            years_at_company: 5,
            personality: "Noggrann och metodisk. Expert på faroanalys.",
            expertise: &["HACCP 7 principer", "CCP-validering", "Faroanalys"],
            limitations: &["Leverantörsavtal, hänvisar till Maria Lindberg"],
        },
        Character {
            name: "Karin Nordin",
            title: "Laboratoriechef",
            role: StaffRole::LabManager,
            years_at_company: 10,
            personality: "Vetenskaplig och faktabaserad. Kräver evidens för alla beslut.",
            expertise: &["Mikrobiologisk analys", "Allergenanalys", "Hållbarhetsstudier"],
            limitations: &["Produktionsplanering, hänvisar till Anders Bergström"],
        },
        Character {
            name: "Erik Johansson",
            title: "Lagerchef",
            role: StaffRole::WarehouseManager,
            years_at_company: 6,
            personality: "Organiserad och systematisk. Fokus på spårbarhet.",
            expertise: &["Kyl/frys-kedjor", "Temperaturövervakning", "Spårbarhetssystem"],
            limitations: &["HACCP-planens detaljer, hänvisar till Lisa Ek"],
        },
        Character {
            name: "Johan Persson",
            title: "Underhållschef",
            role: StaffRole::MaintenanceManager,
            years_at_company: 7,
            personality: "Tekniskt kunnig men ibland dokumentationstrött.",
            expertise: &["Processutrustning", "Förebyggande underhåll", "Kalibrering"],
            limitations: &["Livsmedelssäkerhetskrav, hänvisar till Maria Lindberg"],
        },
        Character {
            name: "Anna Svensson",
            title: "Linjeoperatör",
            role: StaffRole::LineOperator,
            years_at_company: 3,
            personality: "Praktisk och erfaren på sitt område. Mindre insatt i dokumentation.",
            expertise: &["Maskinhantering", "CCP-mätningar", "Allergenrengöring"],
            limitations: &["Varför rutiner är som de är, hänvisar till chefen"],
        },
    ],
    uses_reference_documents: false,
    visitor_rules: &[
        "Hygienklädsel tillhandahålls vid besök i produktionsområden",
        "Handtvätt och desinfektion krävs före inträde",
        "Ingen personlig utrustning (telefon, klocka) tillåten i produktionen",
        "Allergener hanteras, vänligen informera om eventuella allergier",
    ],
};

// ════════════════════════════════════════════════════════════════════════════
// Construction
// ════════════════════════════════════════════════════════════════════════════

static CONSTRUCTION: IndustryProfile = IndustryProfile {
    code: IndustryCode::Construction,
    name: "Bygg/Anläggning",
    company: CompanyProfile {
        name: "Nordbygg Entreprenad AB",
        industry: "Bygg och anläggning",
        employees: 210,
        location: "Stockholm",
        description: "Medelstort byggföretag specialiserat på kommersiella byggprojekt och \
                      renoveringar. Nyproduktion av kontor, skolor och flerbostadshus.",
        products: &[
            "Nyproduktion kommersiella fastigheter",
            "Ombyggnad och renovering",
            "Markentreprenader",
            "Projektledning och byggledning",
        ],
        certifications: &["ISO 9001:2015", "ISO 14001:2015", "ISO 45001:2018", "BF9K"],
        facilities: &[
            "Huvudkontor Stockholm",
            "Maskinpark Arlanda",
            "Projektkontor (temporära)",
            "Byggetableringar",
        ],
        customers: &["Fastighetsbolag", "Kommuner", "Bostadsrättsföreningar", "Industri"],
    },
    sector_standards: &[
        ("AFS 1999:3", "Byggnads- och anläggningsarbete"),
        ("BF9K", "Byggbranschens kvalitetssystem"),
    ],
    terminology: &[
        ("BAS-P", "Byggarbetsmiljösamordnare för planering och projektering"),
        ("BAS-U", "Byggarbetsmiljösamordnare för utförandet"),
        ("AMP", "Arbetsmiljöplan - krävs för alla byggarbetsplatser"),
        ("UE", "Underentreprenör"),
        ("ÄTA", "Ändrings- och tilläggsarbete"),
        ("ABT06", "Allmänna bestämmelser för totalentreprenader"),
        ("AB04", "Allmänna bestämmelser för utförandeentreprenader"),
        ("AMA", "Allmän Material- och Arbetsbeskrivning"),
        ("BKR", "Byggkeramikrådets branschregler för våtrum"),
        ("ID06", "Legitimationssystem för byggbranschen"),
        ("PBL", "Plan- och bygglagen"),
        ("BBR", "Boverkets byggregler"),
        ("APD-plan", "Arbetsplatsdisposition"),
    ],
    characters: &[
        Character {
            name: "Peter Lindgren",
            title: "Kvalitets- och miljöchef",
            role: StaffRole::QualityManager,
            years_at_company: 15,
            personality: "Erfaren och pragmatisk. Förstår byggbranschens utmaningar med dokumentation.",
            expertise: &["ISO 9001, 14001, 45001", "BF9K", "Entreprenadrätt (AB04, ABT06)"],
            limitations: &["Daglig platsledning, hänvisar till Erik Svensson"],
        },
        Character {
            name: "Karin Holm",
            title: "Byggchef",
            role: StaffRole::ConstructionManager,
            years_at_company: 12,
            personality: "Resultatinriktad och van vid att lösa problem i fält. Dokumentation kommer ofta i andra hand.",
            expertise: &["Byggproduktion", "Tidplanering", "Underentreprenörsstyrning"],
            limitations: &["Ledningssystemets dokument, hänvisar till Peter Lindgren"],
        },
        Character {
            name: "Erik Svensson",
            title: "Platschef",
            role: StaffRole::SiteManager,
            years_at_company: 8,
            personality: "Praktiskt lagd och fokuserad på att bygget ska fungera. Stress under tidspress.",
            expertise: &["Byggarbetsledning", "Säkerhet på byggarbetsplats", "Resursplanering"],
            limitations: &["Avtalsfrågor, hänvisar till Lars Bergman"],
        },
        Character {
            name: "Maria Andersson",
            title: "Arbetsmiljösamordnare (BAS-U)",
            role: StaffRole::HseManager,
            years_at_company: 6,
            personality: "Engagerad i arbetsmiljöfrågor. Tar säkerhet på stort allvar.",
            expertise: &["Arbetsmiljölagen", "BAS-U/BAS-P ansvar", "Riskbedömningar"],
            limitations: &["Kalkyl och ekonomi, hänvisar till Lars Bergman"],
        },
        Character {
            name: "Lars Bergman",
            title: "Projektchef",
            role: StaffRole::ProjectManager,
            years_at_company: 10,
            personality: "Strategisk och kundfokuserad. Balanserar kvalitet med ekonomi.",
            expertise: &["Projektledning", "Kontrakthantering", "ÄTA-hantering"],
            limitations: &["Detaljer i egenkontroller, hänvisar till Niklas Ekström"],
        },
        Character {
            name: "Anna Forsberg",
            title: "Inköpschef",
            role: StaffRole::PurchasingManager,
            years_at_company: 5,
            personality: "Analytisk och kostnadsmedveten. Fokuserar på leverantörsrelationer.",
            expertise: &["Materialinköp", "Underentreprenörsupphandling", "Leverantörsutvärdering"],
            limitations: &["Tekniska byggfrågor, hänvisar till Karin Holm"],
        },
        Character {
            name: "Niklas Ekström",
            title: "Arbetsledare",
            role: StaffRole::Supervisor,
            years_at_company: 4,
            personality: "Praktisk och handlingskraftig. Nära arbetet på plats.",
            expertise: &["Byggmetoder", "Arbetsinstruktioner", "Egenkontroller"],
            limitations: &["Övergripande systemfrågor, hänvisar till platschefen"],
        },
    ],
    uses_reference_documents: false,
    visitor_rules: &[
        "Skyddsutrustning (hjälm, skyddsväst, skyddsskor) tillhandahålls",
        "Säkerhetsgenomgång krävs före besök på byggarbetsplatsen",
        "ID06-kort registreras vid inpassering",
    ],
};
