//! Zodiac Fortunes
//!
//! Static astrology content and the daily fortune draw:
//!
//! - **types**: `ZodiacSign` and the per-sign `ZodiacEntry`
//! - **table**: `ZodiacTable`, loaded from the TOML asset
//! - **fortune**: random fortune generation (`FortunePresenter`)
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use zodiac_oracle::zodiac::{FortunePresenter, ZodiacSign, ZodiacTable};
//!
//! let table = ZodiacTable::builtin().unwrap();
//! let presenter = FortunePresenter::new(table);
//! let today = chrono::Local::now().date_naive();
//!
//! let fortune = presenter.draw(ZodiacSign::Aries, today, &mut rand::thread_rng());
//! assert_eq!(fortune.icon, "♈");
//! assert_eq!(fortune.lucky_numbers.len(), 5);
//! ```

pub mod error;
pub mod fortune;
pub mod table;
pub mod types;

pub use error::{ZodiacError, ZodiacResult};
pub use fortune::{
    energy_levels, format_fortune_date, lucky_numbers, random_in_range, EnergyLevels, Fortune,
    FortunePresenter,
};
pub use table::ZodiacTable;
pub use types::{ZodiacEntry, ZodiacSign};
