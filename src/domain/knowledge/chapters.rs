//! Annex SL chapter reference and difficulty calibration.

use crate::domain::session::{AnnexChapter, Difficulty};

/// One controlled document the simulated company can "show".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDocument {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: &'static str,
    pub revision: &'static str,
    pub date: &'static str,
    /// Latent weakness planted in the document, if any.
    pub warning: Option<&'static str>,
}

/// Reference content for one Annex SL chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterReference {
    pub number: u8,
    pub title: &'static str,
    pub content: &'static str,
    /// Ordered from most obvious to most hidden.
    pub typical_findings: &'static [&'static str],
    pub documents: &'static [ReferenceDocument],
}

/// How a difficulty level shapes the simulated company's behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub label: &'static str,
    pub finding_complexity: &'static str,
    /// How many typical findings per chapter are in play; `None` means all.
    pub visible_findings: Option<usize>,
}

/// Looks up the chapter reference. Every valid `AnnexChapter` has an entry.
pub fn chapter_reference(chapter: AnnexChapter) -> &'static ChapterReference {
    let index = (chapter.number() - 4) as usize;
    &CHAPTERS[index.min(CHAPTERS.len() - 1)]
}

pub fn difficulty_profile(difficulty: Difficulty) -> &'static DifficultyProfile {
    match difficulty {
        Difficulty::Basic => &BASIC,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Advanced => &ADVANCED,
    }
}

/// Typical findings for a chapter, trimmed to what the difficulty exposes.
pub fn calibrated_findings(chapter: AnnexChapter, difficulty: Difficulty) -> &'static [&'static str] {
    let findings = chapter_reference(chapter).typical_findings;
    match difficulty_profile(difficulty).visible_findings {
        Some(n) => &findings[..n.min(findings.len())],
        None => findings,
    }
}

static BASIC: DifficultyProfile = DifficultyProfile {
    label: "Grundläggande nivå",
    finding_complexity: "\
- Presentera tydliga, enkla avvikelser som är lätta att identifiera
- Dokumentationsbrister är uppenbara (saknade signaturer, föråldrade revisioner)
- Personal svarar öppet och ärligt, avslöjar problem direkt om de tillfrågas
- Avvikelser finns i grundläggande krav (dokumentstyrning, utbildningsregister)
- Ge tydliga ledtrådar i svaren",
    visible_findings: Some(2),
};

static MEDIUM: DifficultyProfile = DifficultyProfile {
    label: "Medelnivå",
    finding_complexity: "\
- Avvikelser kräver viss fördjupning för att upptäcka
- Systembrister snarare än enskilda dokumentfel
- Personal ger korrekta men inte fullständiga svar, revisorn måste ställa följdfrågor
- Koppling mellan policy och praktik kan brista
- Avvikelser kan finnas i processinteraktioner
- Kräver triangulering av bevis (intervju + dokument + observation)",
    visible_findings: Some(3),
};

static ADVANCED: DifficultyProfile = DifficultyProfile {
    label: "Avancerad nivå",
    finding_complexity: "\
- Dolda systemfel som kräver djup förståelse för att upptäcka
- Konflikterande bevis: dokument säger en sak, praktik en annan
- Personal kan ge motsägelsefulla uppgifter (inte medvetet, men pga bristande kunskap)
- Avvikelser i komplexa områden (riskhantering, processeffektivitet, strategisk planering)
- Kräver att revisorn kopplar samman information från flera källor
- Subtila brister i ledningens engagemang eller systemintegration",
    visible_findings: None,
};

static CHAPTERS: [ChapterReference; 7] = [
    ChapterReference {
        number: 4,
        title: "Organisationens förutsättningar",
        content: "\
### 4.1 Förstå organisationen och dess förutsättningar
- Interna och externa frågor som påverkar ledningssystemet
- SWOT-analys genomförd årligen

### 4.2 Förstå intressenters behov och förväntningar
- Intressentregister med kunder, leverantörer, myndigheter, anställda
- Kundspecifika krav registreras

### 4.3 Bestämma ledningssystemets omfattning
- Omfattning dokumenterad, inga undantag

### 4.4 Ledningssystemet och dess processer
- Processkarta med interaktioner definierad
- Process-KPI:er etablerade",
        typical_findings: &[
            "Omvärldsanalys inte uppdaterad på 2 år",
            "Intressentregister saknar nya kundkrav",
            "Processinteraktioner inte tydligt dokumenterade",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-001",
                title: "Intressentanalys",
                kind: "Register",
                revision: "C",
                date: "2024-01-15",
                warning: Some("Inte uppdaterad på >1 år"),
            },
            ReferenceDocument {
                id: "DOC-002",
                title: "Processkarta - Huvudprocesser",
                kind: "Diagram",
                revision: "D",
                date: "2024-06-01",
                warning: None,
            },
        ],
    },
    ChapterReference {
        number: 5,
        title: "Ledarskap",
        content: "\
### 5.1 Ledarskap och åtagande
- Ledningsgruppen träffas veckovis
- Kvalitet är stående punkt på agendan

### 5.2 Policy
- Policy fastställd 2022
- Kommunicerad via intranät och anslagstavlor

### 5.3 Roller, ansvar och befogenheter
- Organisationsschema uppdaterat
- Befattningsbeskrivningar finns
- Ledningssystemansvarig rapporterar direkt till VD",
        typical_findings: &[
            "Medarbetare i produktionen känner inte till policyn",
            "Befattningsbeskrivningar inte uppdaterade efter omorganisation",
            "Ledningen delegerar kvalitetsfrågor helt till kvalitetschef",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-003",
                title: "Kvalitetspolicy",
                kind: "Policy",
                revision: "B",
                date: "2022-03-15",
                warning: Some("Gammal, saknar aktuella fokusområden"),
            },
            ReferenceDocument {
                id: "DOC-004",
                title: "Organisationsschema",
                kind: "Diagram",
                revision: "E",
                date: "2024-09-01",
                warning: None,
            },
        ],
    },
    ChapterReference {
        number: 6,
        title: "Planering",
        content: "\
### 6.1 Åtgärder för risker och möjligheter
- Riskregister med bedömning av sannolikhet och konsekvens
- Åtgärdsplaner för högriskområden

### 6.2 Mål och planering för att uppnå dem
- Årliga mål fastställda av ledningen
- Uppföljning månadsvis

### 6.3 Planering av ändringar
- Ändringsprocess dokumenterad",
        typical_findings: &[
            "Riskbedömningar inte kopplade till konkreta åtgärder",
            "Mål inte nedbrutna till avdelningsnivå",
            "Ändringar genomförs utan fullständig konsekvensanalys",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-005",
                title: "Kvalitetsmål 2025",
                kind: "Diagram",
                revision: "A",
                date: "2025-01-10",
                warning: Some("Kundreklamationer över target"),
            },
            ReferenceDocument {
                id: "DOC-006",
                title: "Riskregister",
                kind: "Register",
                revision: "C",
                date: "2024-11-20",
                warning: Some("Högrisk R-03 utan deadline"),
            },
        ],
    },
    ChapterReference {
        number: 7,
        title: "Stöd",
        content: "\
### 7.1 Resurser
- Budgetprocess inkluderar investeringar i ledningssystemet
- Kalibreringsintervall: kritisk utrustning årligen

### 7.2 Kompetens
- Kompetensmatris per avdelning
- Utbildningsplan fastställd årligen

### 7.3 Medvetenhet
- Introduktion för alla nyanställda

### 7.4 Kommunikation
- Veckomöten, intranät, avvikelsestatistik på anslagstavlor

### 7.5 Dokumenterad information
- Dokumentstyrningssystem med versionshantering och godkännande",
        typical_findings: &[
            "Kalibreringsprotokoll saknas för 2 mätdon",
            "Kompetensmatris inte uppdaterad efter nyanställningar",
            "Föråldrade dokument i produktion (revision B istället för C)",
            "Utbildning inte dokumenterad för 3 operatörer",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-007",
                title: "Kompetensmatris Produktion",
                kind: "Matris",
                revision: "F",
                date: "2024-08-15",
                warning: Some("Henrik Lund saknar utbildning"),
            },
            ReferenceDocument {
                id: "DOC-008",
                title: "Kalibreringsregister",
                kind: "Register",
                revision: "G",
                date: "2025-01-20",
                warning: Some("MÄT-008 förfallen kalibrering"),
            },
        ],
    },
    ChapterReference {
        number: 8,
        title: "Verksamhet",
        content: "\
### 8.1 Planering och styrning
- Produktionsplanering i affärssystem
- Arbetsinstruktioner vid arbetsplatsen

### 8.2 Krav på produkter och tjänster
- Offertgranskning dokumenterad

### 8.3 Design och utveckling
- Stage-gate process med design review

### 8.4 Externt tillhandahållna processer
- Leverantörsbedömning årligen, godkänd leverantörslista

### 8.5 Produktion och tjänsteutförande
- Spårbarhet via batchnummer, slutkontroll innan leverans

### 8.6 Frisläppning av produkter
- Kontrollant signerar frisläppning

### 8.7 Styrning av avvikande resultat
- Spärrade produkter märks, beslut: skrota, omarbeta, dispens",
        typical_findings: &[
            "Arbetsinstruktion vid maskin 7 är revision A, aktuell är C",
            "Leverantörsbedömning inte genomförd för 2 nya leverantörer",
            "SPC-gränser inte uppdaterade efter processändring",
            "Avvikande produkt saknar spärrmärkning",
            "Inköpsorder saknar hänvisning till specifikation",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-009",
                title: "Kontrollplan HV-2450",
                kind: "Formulär",
                revision: "C",
                date: "2024-04-10",
                warning: Some("Cpk under krav"),
            },
            ReferenceDocument {
                id: "DOC-010",
                title: "Godkända leverantörer",
                kind: "Register",
                revision: "H",
                date: "2024-10-05",
                warning: Some("MetallTech ej utvärderad"),
            },
        ],
    },
    ChapterReference {
        number: 9,
        title: "Utvärdering av prestanda",
        content: "\
### 9.1 Övervakning, mätning, analys
- Månadsrapport med KPI:er
- Kundnöjdhetsenkät årligen

### 9.2 Internrevision
- Årligt revisionsprogram, 3 interna revisorer

### 9.3 Ledningens genomgång
- Genomförs kvartalsvis med standardagenda
- Protokoll med beslut och åtgärder",
        typical_findings: &[
            "Kundreklamationer analyseras inte för trender",
            "Internrevision av inköp inte genomförd enligt plan",
            "Ledningens genomgång saknar input om leverantörsprestanda",
            "Revisorer har granskat egen avdelning",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-011",
                title: "Kundnöjdhetsundersökning 2024",
                kind: "Rapport",
                revision: "A",
                date: "2024-12-15",
                warning: Some("Leveransprecision sjunker"),
            },
            ReferenceDocument {
                id: "DOC-012",
                title: "Internrevisionsrapport 2024",
                kind: "Rapport",
                revision: "A",
                date: "2024-11-30",
                warning: Some("Inköp ej reviderat"),
            },
            ReferenceDocument {
                id: "DOC-013",
                title: "Ledningens genomgång Q3",
                kind: "Rapport",
                revision: "A",
                date: "2024-10-15",
                warning: Some("Input saknas"),
            },
        ],
    },
    ChapterReference {
        number: 10,
        title: "Förbättring",
        content: "\
### 10.1 Allmänt
- Förbättringsförslag via intranät

### 10.2 Avvikelse och korrigerande åtgärd
- Avvikelserapporter i systemet
- Orsaksanalys med 5 varför eller Ishikawa
- Verifiering av åtgärdseffekt

### 10.3 Ständig förbättring
- Förbättringsgrupper på avdelningsnivå, månatliga förbättringsmöten",
        typical_findings: &[
            "Korrigerande åtgärder inte verifierade inom angiven tid",
            "Grundorsak ofta angiven som \"mänskligt fel\" utan djupare analys",
            "Förbättringsförslag behandlas inte systematiskt",
            "Återkommande avvikelser på samma problem",
        ],
        documents: &[
            ReferenceDocument {
                id: "DOC-014",
                title: "Avvikelseregister 2024",
                kind: "Register",
                revision: "D",
                date: "2025-01-25",
                warning: Some("\"Mänskligt fel\" i 50% av fallen"),
            },
            ReferenceDocument {
                id: "DOC-015",
                title: "Förbättringsförslag 2024",
                kind: "Register",
                revision: "B",
                date: "2024-12-20",
                warning: Some("26% ej behandlade"),
            },
        ],
    },
];
