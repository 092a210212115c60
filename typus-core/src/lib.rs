//! Typographic text transformation for Russian and English prose
//!
//! Typus turns typewriter punctuation into typographic glyphs: nested
//! quotation marks, em and en dashes, no-break spaces, primes, vulgar
//! fractions, math and currency signs. Markup and caller-chosen phrases are
//! shielded from every rule and come back byte-identical.
//!
//! # Architecture
//!
//! - **Locale profiles**: immutable configuration loaded from TOML (quote
//!   glyphs, symbol tables, spacing tables, ordered rule groups)
//! - **Shield**: reversible placeholders for markup and escaped phrases
//! - **Quote resolver**: innermost-first quote nesting with alternating styles
//! - **Rule engine**: ordered stages built from the rule catalog
//!
//! # Example
//!
//! ```rust
//! use typus_core::{Typus, TransformOptions};
//!
//! let typus = Typus::english().unwrap();
//! let options = TransformOptions::new();
//!
//! assert_eq!(typus.transform(r#"Say "what" again!"#, &options), "Say “what” again!");
//! assert_eq!(typus.transform("2-3", &options), "2—3");
//! assert_eq!(typus.transform("<code>(c)</code> (c)", &options), "<code>(c)</code> ©");
//! ```

pub mod chars;
pub mod error;
pub mod locale;
pub mod quotes;
pub mod rules;
pub mod shield;
mod typus;

pub use error::{Result, TypusError};
pub use locale::{get_profile, list_available_locales, LocaleProfile};
pub use quotes::QuoteResolver;
pub use rules::{RuleEngine, Stage};
pub use shield::{Registry, Shield, DEFAULT_OPAQUE_TAGS};
pub use typus::{en_typus, ru_typus, TransformOptions, Typus, TypusBuilder};
