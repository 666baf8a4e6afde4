//! Requirement overlays for combined (multi-standard) audits.

use crate::domain::session::StandardCode;

/// A latent requirement gap planted for one standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatentFinding {
    pub id: &'static str,
    pub chapter: u8,
    pub requirement: &'static str,
    pub deficiency: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardOverlay {
    pub standard: StandardCode,
    pub heading: &'static str,
    pub facts: &'static [&'static str],
    pub documents: &'static [&'static str],
    pub findings: &'static [LatentFinding],
}

/// Overlay for a standard; ISO 9001 is the base and has none.
pub fn standard_overlay(standard: StandardCode) -> Option<&'static StandardOverlay> {
    match standard {
        StandardCode::Iso9001 => None,
        StandardCode::Iso14001 => Some(&ISO14001),
        StandardCode::Iso45001 => Some(&ISO45001),
        StandardCode::Iatf16949 => Some(&IATF16949),
    }
}

pub const INTEGRATED_COMMON_ELEMENTS: &[&str] = &[
    "**Kapitel 4**: Organisationens förutsättningar - gemensam intressentanalys",
    "**Kapitel 5**: Ledarskap - integrerad policy",
    "**Kapitel 6**: Planering - gemensam riskhantering med olika fokus",
    "**Kapitel 7**: Stöd - gemensam dokumentstyrning och kompetensmatris",
    "**Kapitel 9**: Utvärdering - samordnad internrevision",
    "**Kapitel 10**: Förbättring - gemensamt avvikelsesystem",
];

pub const INTEGRATED_LINKS: &[&str] = &[
    "Riskbedömning enligt kap 6.1 inkluderar miljö- och arbetsmiljörisker",
    "Kompetenskrav enligt kap 7.2 täcker alla områden",
    "Ledningens genomgång enligt kap 9.3 har input från alla standarder",
    "Korrigerande åtgärder (kap 10.2) hanteras i gemensamt system",
];

pub const INTEGRATED_SYSTEM_GAPS: &[&str] = &[
    "Integrerad policy finns men är inte tydligt kommunicerad till alla medarbetare",
    "Riskregister separata för kvalitet, miljö och arbetsmiljö - ingen helhetsbild",
    "Internrevisorer saknar kompetens att granska alla standarder",
    "Ledningens genomgång täcker inte alla inputkrav från alla standarder",
];

static ISO14001: StandardOverlay = StandardOverlay {
    standard: StandardCode::Iso14001,
    heading: "ISO 14001:2015 - MILJÖLEDNINGSSYSTEM",
    facts: &[
        "**Betydande miljöaspekter**: Energiförbrukning, kemikalieanvändning, avfall",
        "**Miljötillstånd**: Anmälningspliktig verksamhet enligt miljöbalken",
        "**Miljömål 2025**: Minska energiförbrukning med 10%, öka andel återvunnet material till 85%",
    ],
    documents: &[
        "**ENV-DOC-001**: Miljöaspektregister (Rev D, 2024-03-15) - ⚠️ Nya kemikalier saknas",
        "**ENV-DOC-002**: Nödlägesplan miljö (Rev B, 2023-05-10) - ⚠️ Övning ej genomförd",
        "**ENV-DOC-003**: Avfallshanteringsplan (Rev C, 2024-08-20)",
        "**ENV-DOC-004**: Kemikalieförteckning (Rev E, 2024-11-05)",
    ],
    findings: &[
        LatentFinding {
            id: "ENV-001",
            chapter: 4,
            requirement: "Miljöaspekter och miljöpåverkan",
            deficiency: "Miljöaspektregistret saknar bedömning av nya kemikalier införda 2024",
        },
        LatentFinding {
            id: "ENV-002",
            chapter: 6,
            requirement: "Miljömål och planering",
            deficiency: "Mål för energiförbrukning saknar tidsatta delmål",
        },
        LatentFinding {
            id: "ENV-003",
            chapter: 7,
            requirement: "Beredskap och agerande vid nödsituationer",
            deficiency: "Övning av nödlägesplan genomfördes inte under 2024",
        },
        LatentFinding {
            id: "ENV-004",
            chapter: 8,
            requirement: "Avfallshantering",
            deficiency: "Farligt avfall förvaras utan sekundärt skydd",
        },
        LatentFinding {
            id: "ENV-005",
            chapter: 9,
            requirement: "Övervakning av miljöprestanda",
            deficiency: "Kalibrering av energimätare utfördes inte enligt plan",
        },
    ],
};

static ISO45001: StandardOverlay = StandardOverlay {
    standard: StandardCode::Iso45001,
    heading: "ISO 45001:2018 - ARBETSMILJÖLEDNINGSSYSTEM",
    facts: &[
        "**Arbetsmiljörisker**: Buller, vibration, tunga lyft, kemikalieexponering, maskinrisker",
        "**Skyddsorganisation**: Huvudskyddsombud + 4 lokala skyddsombud",
        "**Skyddskommitté**: Möten kvartalsvis (ska vara månadsvis)",
        "**Arbetsolyckor 2024**: 2 st (mål: 0), 8 tillbud rapporterade",
    ],
    documents: &[
        "**OHS-DOC-001**: Riskbedömningsregister (Rev F, 2024-09-10) - ⚠️ Ny maskin saknas",
        "**OHS-DOC-002**: Utbildningsplan säkerhet (Rev C, 2024-01-15) - ⚠️ Truckkort utgångna",
        "**OHS-DOC-003**: Skyddskommittéprotokoll (Rev -, 2024-06-15) - ⚠️ Q3 saknas",
        "**OHS-DOC-004**: Incident- och tillbudsrapporter (Rev -, löpande)",
    ],
    findings: &[
        LatentFinding {
            id: "OHS-001",
            chapter: 4,
            requirement: "Samråd med arbetstagare",
            deficiency: "Protokoll från skyddskommittémöten saknas för Q3 2024",
        },
        LatentFinding {
            id: "OHS-002",
            chapter: 6,
            requirement: "Riskbedömning arbetsmiljö",
            deficiency: "Riskbedömning för ny maskin inte genomförd före driftsättning",
        },
        LatentFinding {
            id: "OHS-003",
            chapter: 7,
            requirement: "Kompetens arbetsmiljö",
            deficiency: "Truckförarutbildning utgången för 2 medarbetare",
        },
        LatentFinding {
            id: "OHS-004",
            chapter: 8,
            requirement: "Åtgärder för att eliminera risker",
            deficiency: "Hörselskydd används inte konsekvent trots bullernivåer >85 dB",
        },
        LatentFinding {
            id: "OHS-005",
            chapter: 10,
            requirement: "Incidenter och tillbud",
            deficiency: "3 tillbud rapporterade men ingen rotorsaksanalys dokumenterad",
        },
    ],
};

static IATF16949: StandardOverlay = StandardOverlay {
    standard: StandardCode::Iatf16949,
    heading: "IATF 16949:2016 - FORDONSINDUSTRI",
    facts: &[
        "**OEM-kunder**: Volvo Cars, Scania, Autoliv",
        "**Kundspecifika krav (CSR)**: Volvo Cars Supplier Quality Manual v5.0, Scania STD4150",
        "**Core Tools**: APQP, PPAP (Level 3 default), FMEA (AIAG-VDA), MSA, SPC (Cpk ≥1.33)",
    ],
    documents: &[
        "**IATF-DOC-001**: CSR-register (Rev H, 2024-05-10) - ⚠️ Volvo CSR ej uppdaterad",
        "**IATF-DOC-002**: APQP-projektplan HV-2450 (Rev C, 2024-10-15)",
        "**IATF-DOC-003**: Process-FMEA Linje 3 (Rev B, 2024-02-20) - ⚠️ Ej uppdaterad",
        "**IATF-DOC-004**: MSA-rapport mätrum (Rev A, 2024-08-15) - ⚠️ GRR >30%",
        "**IATF-DOC-005**: PPAP-paket AX-3200 (Rev A, 2025-01-10) - ⚠️ Saknar Ppk",
    ],
    findings: &[
        LatentFinding {
            id: "IATF-001",
            chapter: 4,
            requirement: "Kundspecifika krav (CSR)",
            deficiency: "Volvo CSR version 4.2 implementerad, men version 5.0 gäller sedan 2024-07",
        },
        LatentFinding {
            id: "IATF-002",
            chapter: 7,
            requirement: "MSA - Measurement System Analysis",
            deficiency: "GRR-studie för kritiskt mått visar >30% variation (krav <10%)",
        },
        LatentFinding {
            id: "IATF-003",
            chapter: 8,
            requirement: "APQP/PPAP",
            deficiency: "PPAP för ny komponent saknar kapacitetsstudie (Ppk)",
        },
        LatentFinding {
            id: "IATF-004",
            chapter: 8,
            requirement: "FMEA",
            deficiency: "Process-FMEA inte uppdaterad efter processändring på linje 3",
        },
        LatentFinding {
            id: "IATF-005",
            chapter: 8,
            requirement: "Kontrollplan",
            deficiency: "Reaktionsplan saknas för kritisk parameter i kontrollplan",
        },
        LatentFinding {
            id: "IATF-006",
            chapter: 9,
            requirement: "SPC - Statistical Process Control",
            deficiency: "Cpk-beräkning använder kortsiktig istället för långsiktig kapabilitet",
        },
        LatentFinding {
            id: "IATF-007",
            chapter: 10,
            requirement: "8D-problemlösning",
            deficiency: "8D-rapport för kundreklamation saknar verifiering av permanent åtgärd (D7)",
        },
    ],
};
