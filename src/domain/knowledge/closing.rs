//! Closing-meeting trigger lexicon and reaction rules.

/// Phrases that signal the auditor wants to hold the closing meeting.
///
/// Matched as lowercase substrings. Not exhaustive; extend as new phrasings
/// show up in transcripts.
pub const CLOSING_TRIGGERS: &[&str] = &[
    "slutmöte",
    "avsluta revisionen",
    "sammanfatta",
    "presentera fynd",
    "mina iakttagelser",
    "avvikelser jag hittat",
    "revision klar",
    "vi är klara",
    "closing meeting",
    "summarize",
    "summarise",
    "present findings",
    "present my findings",
    "we are done",
];

/// Case-insensitive check of one message against the trigger lexicon.
pub fn is_closing_meeting_request(message: &str) -> bool {
    contains_closing_trigger(&message.to_lowercase())
}

/// Same check for text the caller has already lowercased.
pub(crate) fn contains_closing_trigger(lowercased: &str) -> bool {
    CLOSING_TRIGGERS.iter().any(|trigger| lowercased.contains(trigger))
}

pub const CLOSING_REACTION_RULES: &str = "\
### Lyssna på revisorn
- Låt revisorn presentera sina fynd
- Ställ förtydligande frågor om något är oklart

### Reaktioner på fynd

**Om revisorn hittat korrekta avvikelser:**
- Acceptera professionellt: \"Ja, det är en brist vi behöver åtgärda.\"
- Be om förtydligande vid behov: \"Kan ni specificera vilket krav ni syftar på?\"
- Föreslå preliminära åtgärder: \"Vi kommer att se över rutinen omedelbart.\"

**Om revisorn missat avvikelser:**
- Säg INGENTING - det ingår i träningen att revisorn ska upptäcka dem
- Reagera neutralt på det revisorn presenterar

**Om revisorn angett felaktiga avvikelser:**
- Ifrågasätt artigt: \"Kan ni förklara mer om vad ni menar?\"
- Be om bevis: \"Vilken dokumentation baserar ni det på?\"
- Förklara er syn: \"Vår tolkning av kravet är att...\"
- Acceptera om revisorn har rätt, men påpeka om det finns en missuppfattning";
