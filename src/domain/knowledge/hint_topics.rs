//! Focus areas a mentor points to when hinting within a chapter.

use crate::domain::session::AnnexChapter;

pub fn chapter_hint_topics(chapter: AnnexChapter) -> &'static [&'static str] {
    match chapter.number() {
        4 => &[
            "Intressentanalys - Fråga hur externa och interna faktorer identifieras och uppdateras",
            "Ledningssystemets omfattning - Verifiera att scope täcker alla relevanta processer",
            "Processinteraktioner - Be om att se processkarta och förklaring av kopplingar",
        ],
        5 => &[
            "Ledningens engagemang - Fråga hur ledningen visar sitt engagemang i praktiken",
            "Kvalitetspolicy - Verifiera att policyn är kommunicerad och förstådd",
            "Roller och ansvar - Be om organisationsschema och ansvarsbeskrivningar",
        ],
        6 => &[
            "Risker och möjligheter - Fråga hur risker identifieras, bedöms och hanteras",
            "Kvalitetsmål - Verifiera att målen är SMARTa och följs upp",
            "Ändringshantering - Hur planeras och kontrolleras förändringar?",
        ],
        7 => &[
            "Resurser och infrastruktur - Fråga om underhåll och kalibrering",
            "Kompetens - Be om utbildningsplaner och kompetensutvärderingar",
            "Dokumentstyrning - Kontrollera revisionsstatus och godkännanden",
        ],
        8 => &[
            "Operativ planering - Fråga om produktionsplanering och kapacitet",
            "Kundkommunikation - Hur hanteras kundkrav och reklamationer?",
            "Leverantörsstyrning - Be om leverantörsutvärderingar och godkännandekriterier",
        ],
        9 => &[
            "Övervakning och mätning - Fråga om KPI:er och hur de följs upp",
            "Internrevision - Be om revisionsplan och uppföljning av fynd",
            "Ledningens genomgång - Fråga om senaste genomgång och beslut",
        ],
        10 => &[
            "Avvikelsehantering - Fråga om processen för korrigerande åtgärder",
            "Ständig förbättring - Hur identifieras och implementeras förbättringar?",
            "Grundorsaksanalys - Be om exempel på 5 varför eller fiskbensdiagram",
        ],
        _ => &[],
    }
}
