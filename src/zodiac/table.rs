//! Zodiac Table
//!
//! The twelve sign records plus the shared advice list, loaded from TOML.
//! The default table is embedded from `assets/zodiac.toml`.

use serde::Deserialize;
use std::path::Path;

use super::error::{ZodiacError, ZodiacResult};
use super::types::{ZodiacEntry, ZodiacSign};

const BUILTIN_TABLE: &str = include_str!("../../assets/zodiac.toml");

/// Immutable lookup table keyed by sign
#[derive(Debug, Clone)]
pub struct ZodiacTable {
    /// Indexed by `ZodiacSign::index`
    entries: Vec<ZodiacEntry>,
    advice: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    advice: Vec<String>,
    #[serde(default, rename = "sign")]
    signs: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    key: String,
    name: String,
    icon: String,
    element: String,
    fortunes: Vec<String>,
    colors: Vec<String>,
    compatible_signs: Vec<String>,
}

impl ZodiacTable {
    /// Load the table shipped with the crate
    pub fn builtin() -> ZodiacResult<Self> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Load a table from a TOML file on disk
    pub fn from_path(path: &Path) -> ZodiacResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ZodiacError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a table.
    ///
    /// Every sign must appear exactly once and every candidate list must be
    /// non-empty, so lookups and random picks never fail afterwards.
    pub fn from_toml_str(content: &str) -> ZodiacResult<Self> {
        let raw: RawTable = toml::from_str(content)?;

        if raw.advice.is_empty() {
            return Err(ZodiacError::EmptyList {
                sign: "all signs".to_string(),
                field: "advice",
            });
        }

        let mut slots: Vec<Option<ZodiacEntry>> = vec![None; ZodiacSign::ALL.len()];

        for entry in raw.signs {
            let sign: ZodiacSign = entry.key.parse()?;

            for (field, list) in [
                ("fortunes", &entry.fortunes),
                ("colors", &entry.colors),
                ("compatible_signs", &entry.compatible_signs),
            ] {
                if list.is_empty() {
                    return Err(ZodiacError::EmptyList {
                        sign: sign.key().to_string(),
                        field,
                    });
                }
            }

            let slot = &mut slots[sign.index()];
            if slot.is_some() {
                return Err(ZodiacError::DuplicateSign(sign.key().to_string()));
            }
            *slot = Some(ZodiacEntry {
                sign,
                name: entry.name,
                icon: entry.icon,
                element: entry.element,
                fortunes: entry.fortunes,
                colors: entry.colors,
                compatible_signs: entry.compatible_signs,
            });
        }

        let entries = slots
            .into_iter()
            .zip(ZodiacSign::ALL)
            .map(|(slot, sign)| slot.ok_or_else(|| ZodiacError::MissingSign(sign.key().to_string())))
            .collect::<ZodiacResult<Vec<_>>>()?;

        tracing::debug!(signs = entries.len(), advice = raw.advice.len(), "Loaded zodiac table");

        Ok(Self {
            entries,
            advice: raw.advice,
        })
    }

    /// Record for a sign
    pub fn entry(&self, sign: ZodiacSign) -> &ZodiacEntry {
        &self.entries[sign.index()]
    }

    /// All records in display order
    pub fn signs(&self) -> impl Iterator<Item = &ZodiacEntry> {
        self.entries.iter()
    }

    /// Shared advice strings
    pub fn advice(&self) -> &[String] {
        &self.advice
    }
}
