//! Error types
//!
//! Only configuration can fail. Once a [`crate::Typus`] is built, every
//! transformation is infallible.

use thiserror::Error;

/// Errors raised while building locale profiles and rule engines
#[derive(Debug, Error)]
pub enum TypusError {
    /// Locale configuration is inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Quote glyphs do not form two pairs of distinct characters
    #[error("quote glyphs must be four distinct characters, got {0:?}")]
    QuoteGlyphs(Vec<String>),

    /// Two keys of one symbol table fold to the same token
    #[error("duplicate symbol '{key}' in table '{table}'")]
    DuplicateSymbol {
        /// Table the key belongs to
        table: &'static str,
        /// The colliding key, lowercased
        key: String,
    },

    /// A symbol table maps a token to anything but a single codepoint
    #[error("symbol '{key}' in table '{table}' must map to one character, got {value:?}")]
    InvalidGlyph {
        /// Table the entry belongs to
        table: &'static str,
        /// Offending key
        key: String,
        /// Offending value
        value: String,
    },

    /// A rule group requires a table the locale leaves empty
    #[error("rule '{rule}' requires a non-empty {table}")]
    MissingTable {
        /// Rule group name
        rule: String,
        /// Missing table
        table: &'static str,
    },

    /// Rule order names a group the catalog does not provide
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// Rule order lists a group more than once
    #[error("rule '{0}' is listed more than once")]
    DuplicateRule(String),

    /// A rule pattern failed to compile
    #[error("invalid pattern in rule '{rule}': {source}")]
    Pattern {
        /// Rule name
        rule: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Locale code is not embedded
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// TOML document could not be parsed
    #[error("failed to parse locale config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Locale file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, TypusError>;
