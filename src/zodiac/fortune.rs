//! Fortune Presenter
//!
//! Draws a daily fortune for a sign from the static table. Every draw is
//! independent: asking twice for the same sign gives fresh values.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

use super::table::ZodiacTable;
use super::types::ZodiacSign;

/// Inclusive bounds for energy meters (percent)
pub const ENERGY_MIN: u8 = 60;
pub const ENERGY_MAX: u8 = 100;

/// Inclusive bounds for lucky numbers
pub const LUCKY_MIN: u8 = 1;
pub const LUCKY_MAX: u8 = 99;

/// How many lucky numbers a fortune shows
pub const LUCKY_COUNT: usize = 5;

/// Energy meter readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnergyLevels {
    pub love: u8,
    pub career: u8,
    pub health: u8,
    pub finance: u8,
}

impl EnergyLevels {
    /// Labelled readings in display order
    pub fn labelled(&self) -> [(&'static str, u8); 4] {
        [
            ("Love", self.love),
            ("Career", self.career),
            ("Health", self.health),
            ("Finance", self.finance),
        ]
    }
}

/// One displayed fortune
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fortune {
    pub sign: ZodiacSign,
    pub name: String,
    pub icon: String,
    pub element: String,
    /// Formatted like "Wednesday, October 14, 2026"
    pub date: String,
    pub fortune: String,
    pub energy: EnergyLevels,
    /// Distinct, ascending
    pub lucky_numbers: Vec<u8>,
    pub lucky_color: String,
    pub compatible_sign: String,
    pub advice: String,
}

impl Fortune {
    /// Sentence shown under "Compatibility"
    pub fn compatibility_text(&self) -> String {
        format!(
            "Today you have excellent cosmic alignment with {}. Connections with this sign may bring unexpected joy and mutual understanding.",
            self.compatible_sign
        )
    }

    /// Color name usable as a swatch key ("Light Blue" -> "lightblue")
    pub fn color_swatch(&self) -> String {
        self.lucky_color.to_lowercase().replacen(' ', "", 1)
    }
}

/// Uniform integer in `[min, max]`
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: u8, max: u8) -> u8 {
    rng.gen_range(min..=max)
}

/// Five distinct numbers in `[1, 99]`, sorted ascending
pub fn lucky_numbers<R: Rng + ?Sized>(rng: &mut R) -> Vec<u8> {
    let mut numbers = BTreeSet::new();
    while numbers.len() < LUCKY_COUNT {
        numbers.insert(random_in_range(rng, LUCKY_MIN, LUCKY_MAX));
    }
    numbers.into_iter().collect()
}

/// Four independent readings in `[60, 100]`
pub fn energy_levels<R: Rng + ?Sized>(rng: &mut R) -> EnergyLevels {
    EnergyLevels {
        love: random_in_range(rng, ENERGY_MIN, ENERGY_MAX),
        career: random_in_range(rng, ENERGY_MIN, ENERGY_MAX),
        health: random_in_range(rng, ENERGY_MIN, ENERGY_MAX),
        finance: random_in_range(rng, ENERGY_MIN, ENERGY_MAX),
    }
}

/// Long US-style date
pub fn format_fortune_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [String]) -> &'a str {
    // Lists are validated non-empty when the table loads
    let last = items.len().saturating_sub(1);
    &items[rng.gen_range(0..=last)]
}

/// Generates fortunes from a loaded table
#[derive(Debug, Clone)]
pub struct FortunePresenter {
    table: ZodiacTable,
}

impl FortunePresenter {
    pub fn new(table: ZodiacTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ZodiacTable {
        &self.table
    }

    /// Draw a fresh fortune for `sign`
    pub fn draw<R: Rng + ?Sized>(&self, sign: ZodiacSign, date: NaiveDate, rng: &mut R) -> Fortune {
        let entry = self.table.entry(sign);

        let fortune = pick(rng, &entry.fortunes).to_string();
        let energy = energy_levels(rng);
        let lucky_numbers = lucky_numbers(rng);
        let lucky_color = pick(rng, &entry.colors).to_string();
        let compatible_sign = pick(rng, &entry.compatible_signs).to_string();
        let advice = pick(rng, self.table.advice()).to_string();

        Fortune {
            sign,
            name: entry.name.clone(),
            icon: entry.icon.clone(),
            element: entry.element.clone(),
            date: format_fortune_date(date),
            fortune,
            energy,
            lucky_numbers,
            lucky_color,
            compatible_sign,
            advice,
        }
    }
}
