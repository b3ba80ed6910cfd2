//! Zodiac sign types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ZodiacError;

/// One of the twelve zodiac signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// All signs in display order
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Lowercase identifier used in the table and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ZodiacSign {
    type Err = ZodiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.key() == needle)
            .ok_or_else(|| ZodiacError::UnknownSign(s.to_string()))
    }
}

/// Static record for one sign
#[derive(Debug, Clone, Serialize)]
pub struct ZodiacEntry {
    pub sign: ZodiacSign,
    /// Display name ("Aries")
    pub name: String,
    /// Glyph ("♈")
    pub icon: String,
    pub element: String,
    pub fortunes: Vec<String>,
    pub colors: Vec<String>,
    pub compatible_signs: Vec<String>,
}
