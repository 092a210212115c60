//! Locale profiles
//!
//! A locale is plain configuration data: quote glyphs, symbol tables,
//! spacing tables and the ordered list of rule groups. Two locales are
//! embedded, others can be loaded from TOML files.

pub mod config;
pub(crate) mod loader;
pub mod profile;

pub use config::LocaleConfig;
pub use loader::{embedded_source, get_profile, list_available_locales};
pub use profile::{Currency, LocaleProfile, QuoteGlyphs, SpacingTable, SymbolMap};
