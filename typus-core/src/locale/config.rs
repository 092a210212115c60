//! Configuration structures
//!
//! This module defines the TOML schema for locale configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root locale configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub metadata: Metadata,
    pub quotes: Quotes,
    #[serde(default)]
    pub classes: Classes,
    pub rules: Rules,
    #[serde(default)]
    pub symbols: Symbols,
    #[serde(default)]
    pub math: Math,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub units: Units,
}

/// Locale metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Quote glyphs, left then right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotes {
    pub odd: [String; 2],
    pub even: [String; 2],
}

/// Character classes used inside rule patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classes {
    #[serde(default = "default_letters")]
    pub letters: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            letters: default_letters(),
        }
    }
}

/// Ordered rule groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    pub order: Vec<String>,
}

/// Token to glyph tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Symbols {
    #[serde(default)]
    pub complex: BTreeMap<String, String>,
    #[serde(default)]
    pub fractions: BTreeMap<String, String>,
}

/// Math operator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Math {
    /// Characters that put a number into arithmetic context
    #[serde(default)]
    pub operators: String,
    /// Operator characters (every char of the key) to glyph
    #[serde(default)]
    pub signs: BTreeMap<String, String>,
}

/// Positional spacing tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spacing {
    /// Symbols that get a no-break space instead of a regular one
    #[serde(default)]
    pub insert: SymbolSides,
    /// Symbols that lose any space next to them
    #[serde(default)]
    pub delete: SymbolSides,
}

/// Symbol sets by side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolSides {
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
    #[serde(default)]
    pub both: String,
}

/// Currency folding after numerals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub glyph: String,
    pub suffixes: Vec<String>,
    /// Put a no-break space between the number and the glyph
    #[serde(default = "default_true")]
    pub spaced: bool,
}

/// Unit spacing exceptions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Units {
    /// Suffixes glued to numerals without a space (ordinals and the like)
    #[serde(default)]
    pub exceptions: Vec<String>,
}

fn default_letters() -> String {
    r"[^\W\d_]".to_string()
}

fn default_true() -> bool {
    true
}

impl LocaleConfig {
    /// Validate the parts that need no compiled state
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.code.trim().is_empty() {
            return Err("Locale code must not be empty".to_string());
        }

        if self.rules.order.is_empty() {
            return Err("No rules defined".to_string());
        }

        Ok(())
    }
}
