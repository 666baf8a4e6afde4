//! Interview techniques and per-chapter best-practice questions.

use crate::domain::session::AnnexChapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewTechnique {
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub when_to_use: &'static str,
}

/// Reference question for one area of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterPractice {
    pub area: &'static str,
    pub topic: &'static str,
    pub optimal_approach: &'static str,
    pub technique: &'static str,
    pub iso_reference: &'static str,
    pub explanation: &'static str,
}

pub fn interview_techniques() -> &'static [InterviewTechnique] {
    &TECHNIQUES
}

pub fn chapter_practices(chapter: AnnexChapter) -> &'static [ChapterPractice] {
    match chapter.number() {
        4 => &CHAPTER_4,
        5 => &CHAPTER_5,
        6 => &CHAPTER_6,
        7 => &CHAPTER_7,
        8 => &CHAPTER_8,
        9 => &CHAPTER_9,
        10 => &CHAPTER_10,
        _ => &[],
    }
}

static TECHNIQUES: [InterviewTechnique; 7] = [
    InterviewTechnique {
        name: "5 Varför",
        description: "Fråga \"varför\" upprepade gånger för att nå grundorsaken",
        example: "Varför missades leveransen? → Varför var maskinen ur funktion? → Varför utfördes inte underhållet?",
        when_to_use: "Vid avvikelser, för att hitta systembrister bakom enskilda händelser",
    },
    InterviewTechnique {
        name: "Tratt-tekniken",
        description: "Börja med breda öppna frågor, smalna av mot specifika detaljer",
        example: "Hur fungerar er reklamationshantering? → Hur dokumenterar ni åtgärden? → Vem godkänner stängningen?",
        when_to_use: "Vid processgenomgångar, för att få överblick innan fördjupning",
    },
    InterviewTechnique {
        name: "Omvänd tratt",
        description: "Börja med specifik detalj, utvidga till större sammanhang",
        example: "Jag ser att denna avvikelse stängdes igår. Hur beslutades det? → Hur rapporteras trender till ledningen?",
        when_to_use: "När du hittat något intressant och vill förstå systemet bakom",
    },
    InterviewTechnique {
        name: "Visa mig",
        description: "Be om konkreta bevis istället för muntliga svar",
        example: "Kan du visa mig det senaste kalibreringsprotokollet?",
        when_to_use: "För att verifiera påståenden med objektiva bevis",
    },
    InterviewTechnique {
        name: "Triangulering",
        description: "Verifiera samma information från tre källor: dokument, intervju, observation",
        example: "Proceduren säger X, operatören säger Y, och i praktiken ser jag Z",
        when_to_use: "Alltid, för att säkerställa bevisens tillförlitlighet",
    },
    InterviewTechnique {
        name: "Tystnad",
        description: "Pausa efter svar för att uppmuntra vidare förklaring",
        example: "Efter svaret, vänta 3-5 sekunder innan nästa fråga.",
        when_to_use: "När du misstänker att det finns mer att berätta",
    },
    InterviewTechnique {
        name: "Spegling",
        description: "Upprepa nyckelfras från svaret för att få fördjupning",
        example: "\"Vi har ibland problem med leveranser\" → \"Ibland problem?\"",
        when_to_use: "För att få personen att utveckla ett intressant uttalande",
    },
];

static CHAPTER_4: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Intressentanalys",
        topic: "Identifiering av intressenter",
        optimal_approach: "Hur identifierar ni era intressenter och deras krav? Kan du visa mig er intressentanalys och berätta hur ofta den uppdateras?",
        technique: "Tratt-tekniken",
        iso_reference: "ISO 9001:2015 4.2",
        explanation: "Börja brett med hur de identifierar, sedan specifikt om dokumentation och uppdatering",
    },
    ChapterPractice {
        area: "Ledningssystemets omfattning",
        topic: "Scope och avgränsningar",
        optimal_approach: "Jag ser att er scope täcker produktion. Hur har ni bedömt att konstruktion inte behöver ingå?",
        technique: "Omvänd tratt",
        iso_reference: "ISO 9001:2015 4.3",
        explanation: "Utgå från dokumenterat scope, fråga om avgränsningar och motivering",
    },
];

static CHAPTER_5: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Ledningens engagemang",
        topic: "Praktiskt ledarskap",
        optimal_approach: "Hur visar ledningen sitt engagemang i praktiken? Kan du ge mig några konkreta exempel från senaste månaden?",
        technique: "Visa mig",
        iso_reference: "ISO 9001:2015 5.1",
        explanation: "Undvik teoretiska svar, be om konkreta exempel som kan verifieras",
    },
    ChapterPractice {
        area: "Kvalitetspolicy",
        topic: "Kommunikation och förståelse",
        optimal_approach: "Kan du berätta med egna ord vad er kvalitetspolicy innebär för ditt dagliga arbete?",
        technique: "Direkt fråga",
        iso_reference: "ISO 9001:2015 5.2",
        explanation: "Fråga operatörer, inte bara chefer, för att verifiera kommunikation",
    },
];

static CHAPTER_6: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Risker och möjligheter",
        topic: "Riskhantering i praktiken",
        optimal_approach: "Visa mig hur ni identifierade och bedömde riskerna för denna process. Hur ofta omprövas riskbedömningen?",
        technique: "5 Varför + Visa mig",
        iso_reference: "ISO 9001:2015 6.1",
        explanation: "Kombinera dokumentgranskning med frågor om processen",
    },
    ChapterPractice {
        area: "Kvalitetsmål",
        topic: "Mätning och uppföljning",
        optimal_approach: "Jag ser att ni har målet \"98% leveransprecision\". Hur mäter ni det exakt? Vad gör ni när målet inte nås?",
        technique: "Tratt-tekniken",
        iso_reference: "ISO 9001:2015 6.2",
        explanation: "Verifiera att målen är mätbara och följs upp systematiskt",
    },
];

static CHAPTER_7: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Kompetens",
        topic: "Utbildning och utvärdering",
        optimal_approach: "Hur säkerställer ni att personal har rätt kompetens? Kan du visa mig kompetensmatrisen för denna avdelning?",
        technique: "Visa mig + Triangulering",
        iso_reference: "ISO 9001:2015 7.2",
        explanation: "Verifiera med dokumentation OCH intervju med operatör",
    },
    ChapterPractice {
        area: "Dokumenterad information",
        topic: "Styrning och åtkomst",
        optimal_approach: "Hur vet du att du arbetar med rätt version av instruktionen? Vad händer om du hittar ett fel i dokumentet?",
        technique: "Direkt fråga till operatör",
        iso_reference: "ISO 9001:2015 7.5",
        explanation: "Fråga användare, inte dokumentstyrningsansvarig, för verklig bild",
    },
];

static CHAPTER_8: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Leverantörsstyrning",
        topic: "Utvärdering och uppföljning",
        optimal_approach: "Vilka kriterier använder ni för att godkänna en ny leverantör? Visa mig en utvärdering.",
        technique: "Tratt-tekniken + Visa mig",
        iso_reference: "ISO 9001:2015 8.4",
        explanation: "Verifiera hela kedjan från godkännande till uppföljning",
    },
    ChapterPractice {
        area: "Produktion",
        topic: "Processstyrning",
        optimal_approach: "Hur vet operatören vilka inställningar som ska användas? Vad händer om något avviker från specifikationen?",
        technique: "Observation + Intervju",
        iso_reference: "ISO 9001:2015 8.5",
        explanation: "Observera i produktionen och fråga operatören direkt",
    },
];

static CHAPTER_9: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Internrevision",
        topic: "Planering och uppföljning",
        optimal_approach: "Visa mig revisionsprogrammet. Hur bestämmer ni vilka områden som ska revideras oftare?",
        technique: "Visa mig + 5 Varför",
        iso_reference: "ISO 9001:2015 9.2",
        explanation: "Verifiera riskbaserad planering och effektiv uppföljning",
    },
    ChapterPractice {
        area: "Ledningens genomgång",
        topic: "Input och beslut",
        optimal_approach: "Kan du visa mig protokollet från senaste ledningens genomgång? Vilka beslut fattades och hur följdes de upp?",
        technique: "Visa mig + Tratt-tekniken",
        iso_reference: "ISO 9001:2015 9.3",
        explanation: "Verifiera att genomgången leder till åtgärder",
    },
];

static CHAPTER_10: [ChapterPractice; 2] = [
    ChapterPractice {
        area: "Avvikelsehantering",
        topic: "Korrigerande åtgärder",
        optimal_approach: "Visa mig en nyligen stängd avvikelse. Hur analyserades grundorsaken? Hur verifierade ni att åtgärden var effektiv?",
        technique: "5 Varför + Visa mig",
        iso_reference: "ISO 9001:2015 10.2",
        explanation: "Följ en specifik avvikelse genom hela processen",
    },
    ChapterPractice {
        area: "Ständig förbättring",
        topic: "Förbättringsprocess",
        optimal_approach: "Ge mig ett exempel på en förbättring som genomförts det senaste halvåret. Hur mättes resultatet?",
        technique: "Omvänd tratt",
        iso_reference: "ISO 9001:2015 10.3",
        explanation: "Konkreta exempel visar om förbättringsprocessen fungerar",
    },
];
