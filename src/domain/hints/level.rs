use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Disclosure tier of a hint, escalating from a nudge to a full answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HintLevel {
    Subtle,
    Concrete,
    Full,
}

impl HintLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Parses a requested level; only 1, 2 and 3 are accepted.
    pub fn new(level: u8) -> Result<Self, ValidationError> {
        match level {
            1 => Ok(Self::Subtle),
            2 => Ok(Self::Concrete),
            3 => Ok(Self::Full),
            other => Err(ValidationError::out_of_range(
                "level",
                Self::MIN as i32,
                Self::MAX as i32,
                other as i32,
            )),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::Subtle => 1,
            Self::Concrete => 2,
            Self::Full => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Subtle => "Subtil ledtråd",
            Self::Concrete => "Konkret förslag",
            Self::Full => "Fullständigt svar",
        }
    }

    /// Instruction block telling the mentor how much to disclose.
    pub fn instructions(&self) -> &'static str {
        match self {
            Self::Subtle => {
                "GE EN SUBTIL LEDTRÅD:\n\
                 - Ställ en öppen motfråga som leder revisorn åt rätt håll\n\
                 - Nämn ett område som kan vara värt att utforska\n\
                 - Undvik att avslöja specifika avvikelser eller svar\n\
                 - Håll det kort (1-2 meningar)"
            }
            Self::Concrete => {
                "GE ETT KONKRET FÖRSLAG:\n\
                 - Föreslå en specifik fråga eller teknik att använda\n\
                 - Peka på ett dokument eller process som bör undersökas\n\
                 - Ge ett exempel på hur frågan kan formuleras\n\
                 - Förklara varför detta område är relevant"
            }
            Self::Full => {
                "GE ETT FULLSTÄNDIGT SVAR:\n\
                 - Förklara exakt vad revisorn bör fråga om\n\
                 - Beskriv vilka avvikelser som finns att upptäcka\n\
                 - Ge exempel på effektiva frågeformuleringar\n\
                 - Förklara kopplingen till standardkraven"
            }
        }
    }
}

impl Default for HintLevel {
    fn default() -> Self {
        Self::Subtle
    }
}

impl TryFrom<u8> for HintLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HintLevel> for u8 {
    fn from(level: HintLevel) -> Self {
        level.number()
    }
}

impl fmt::Display for HintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
