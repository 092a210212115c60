//! Immutable locale profile
//!
//! Bridges the TOML schema and the rule catalog: every table is normalized
//! and validated once here, so rule factories can rely on it.

use crate::error::{Result, TypusError};
use crate::locale::config::{LocaleConfig, SymbolSides};
use crate::rules::catalog;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// The four quote glyphs of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteGlyphs {
    /// Opening glyph of odd nesting levels (1, 3, ...)
    pub odd_left: char,
    /// Closing glyph of odd nesting levels
    pub odd_right: char,
    /// Opening glyph of even nesting levels (2, 4, ...)
    pub even_left: char,
    /// Closing glyph of even nesting levels
    pub even_right: char,
}

impl QuoteGlyphs {
    fn from_config(odd: &[String; 2], even: &[String; 2]) -> Result<Self> {
        let raw: Vec<String> = odd.iter().chain(even.iter()).cloned().collect();
        let glyphs: Vec<char> = raw.iter().filter_map(|g| single_char(g)).collect();

        let distinct: HashSet<char> = glyphs.iter().copied().collect();
        if glyphs.len() != 4 || distinct.len() != 4 {
            return Err(TypusError::QuoteGlyphs(raw));
        }

        Ok(Self {
            odd_left: glyphs[0],
            odd_right: glyphs[1],
            even_left: glyphs[2],
            even_right: glyphs[3],
        })
    }

    /// All four glyphs, odd pair first
    pub fn as_array(&self) -> [char; 4] {
        [self.odd_left, self.odd_right, self.even_left, self.even_right]
    }
}

/// Case-insensitive token to glyph table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMap {
    entries: BTreeMap<String, char>,
}

impl SymbolMap {
    fn from_config(table: &'static str, source: &BTreeMap<String, String>) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (key, value) in source {
            let glyph = single_char(value).ok_or_else(|| TypusError::InvalidGlyph {
                table,
                key: key.clone(),
                value: value.clone(),
            })?;

            let folded = key.to_lowercase();
            if entries.insert(folded.clone(), glyph).is_some() {
                return Err(TypusError::DuplicateSymbol { table, key: folded });
            }
        }

        Ok(Self { entries })
    }

    /// Look up a token regardless of case
    pub fn lookup(&self, token: &str) -> Option<char> {
        self.entries.get(&token.to_lowercase()).copied()
    }

    /// Tokens ordered longest first, so alternations prefer `(tm)` over `(t`
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        tokens
    }

    /// Iterate over (token, glyph) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, char)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Symbol sets partitioned by the side a space is handled on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpacingTable {
    pub before: String,
    pub after: String,
    pub both: String,
}

impl SpacingTable {
    fn from_config(sides: &SymbolSides) -> Self {
        Self {
            before: sides.before.clone(),
            after: sides.after.clone(),
            both: sides.both.clone(),
        }
    }

    /// Symbols handled on their left side
    pub fn left_of(&self) -> String {
        format!("{}{}", self.before, self.both)
    }

    /// Symbols handled on their right side
    pub fn right_of(&self) -> String {
        format!("{}{}", self.after, self.both)
    }
}

/// Currency folding configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub glyph: String,
    pub suffixes: Vec<String>,
    pub spaced: bool,
}

/// Everything a rule engine needs to know about a language
#[derive(Debug, Clone)]
pub struct LocaleProfile {
    code: String,
    name: String,
    quotes: QuoteGlyphs,
    letters: String,
    rule_order: Vec<String>,
    complex_symbols: SymbolMap,
    fractions: SymbolMap,
    math_operators: String,
    math_signs: SymbolMap,
    insert_spaces: SpacingTable,
    delete_spaces: SpacingTable,
    currency: Option<Currency>,
    unit_exceptions: Vec<String>,
}

impl LocaleProfile {
    /// Create from configuration
    pub fn from_config(config: &LocaleConfig) -> Result<Self> {
        config.validate().map_err(TypusError::Configuration)?;

        let quotes = QuoteGlyphs::from_config(&config.quotes.odd, &config.quotes.even)?;

        regex::Regex::new(&config.classes.letters).map_err(|source| TypusError::Pattern {
            rule: "classes.letters".to_string(),
            source,
        })?;

        let mut seen = HashSet::new();
        for name in &config.rules.order {
            if !seen.insert(name.as_str()) {
                return Err(TypusError::DuplicateRule(name.clone()));
            }
            if !catalog::is_known(name) {
                return Err(TypusError::UnknownRule(name.clone()));
            }
        }

        let currency = config.currency.as_ref().map(|c| Currency {
            glyph: c.glyph.clone(),
            suffixes: c.suffixes.iter().map(|s| s.to_lowercase()).collect(),
            spaced: c.spaced,
        });

        let profile = Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            quotes,
            letters: config.classes.letters.clone(),
            rule_order: config.rules.order.clone(),
            complex_symbols: SymbolMap::from_config("symbols.complex", &config.symbols.complex)?,
            fractions: SymbolMap::from_config("symbols.fractions", &config.symbols.fractions)?,
            math_operators: config.math.operators.clone(),
            math_signs: SymbolMap::from_config("math.signs", &config.math.signs)?,
            insert_spaces: SpacingTable::from_config(&config.spacing.insert),
            delete_spaces: SpacingTable::from_config(&config.spacing.delete),
            currency,
            unit_exceptions: config
                .units
                .exceptions
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        };

        catalog::check_requirements(&profile)?;

        log::debug!(
            "built locale profile '{}' with {} rule groups",
            profile.code,
            profile.rule_order.len()
        );

        Ok(profile)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: LocaleConfig = toml::from_str(source)?;
        Self::from_config(&config)
    }

    /// Load from a TOML file, optionally overriding the locale code
    pub fn from_file<P: AsRef<Path>>(path: P, code: Option<&str>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let mut config: LocaleConfig = toml::from_str(&source)?;
        if let Some(code) = code {
            config.metadata.code = code.to_string();
        }
        Self::from_config(&config)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quotes(&self) -> QuoteGlyphs {
        self.quotes
    }

    /// Regex class matching a single letter
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Rule group names in application order
    pub fn rule_order(&self) -> &[String] {
        &self.rule_order
    }

    pub fn complex_symbols(&self) -> &SymbolMap {
        &self.complex_symbols
    }

    pub fn fractions(&self) -> &SymbolMap {
        &self.fractions
    }

    /// Characters that put a neighbouring number into arithmetic context
    pub fn math_operators(&self) -> &str {
        &self.math_operators
    }

    /// Operator characters to their typographic sign
    pub fn math_signs(&self) -> &SymbolMap {
        &self.math_signs
    }

    pub fn insert_spaces(&self) -> &SpacingTable {
        &self.insert_spaces
    }

    pub fn delete_spaces(&self) -> &SpacingTable {
        &self.delete_spaces
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    /// Lowercased suffixes that stay glued to numerals
    pub fn unit_exceptions(&self) -> &[String] {
        &self.unit_exceptions
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &str) -> String {
        format!(
            r#"
[metadata]
code = "xx"
name = "Test"

[quotes]
odd = ["«", "»"]
even = ["„", "“"]

[rules]
order = ["quotes", "spaces"]
{extra}
"#
        )
    }

    #[test]
    fn test_profile_from_minimal_config() {
        let profile = LocaleProfile::from_toml_str(&config("")).unwrap();
        assert_eq!(profile.code(), "xx");
        assert_eq!(profile.quotes().odd_left, '«');
        assert_eq!(profile.quotes().even_right, '“');
        assert_eq!(profile.rule_order(), ["quotes", "spaces"]);
    }

    #[test]
    fn test_quote_glyphs_must_be_distinct() {
        let source = config("").replace(r#"even = ["„", "“"]"#, r#"even = ["«", "“"]"#);
        match LocaleProfile::from_toml_str(&source) {
            Err(TypusError::QuoteGlyphs(glyphs)) => assert_eq!(glyphs.len(), 4),
            other => panic!("Expected QuoteGlyphs error, got {other:?}"),
        }
    }

    #[test]
    fn test_quote_glyphs_must_be_single_chars() {
        let source = config("").replace(r#"odd = ["«", "»"]"#, r#"odd = ["<<", ">>"]"#);
        assert!(matches!(
            LocaleProfile::from_toml_str(&source),
            Err(TypusError::QuoteGlyphs(_))
        ));
    }

    #[test]
    fn test_symbol_keys_collide_case_insensitively() {
        let source = config("[symbols.complex]\n\"(c)\" = \"©\"\n\"(C)\" = \"©\"\n");
        match LocaleProfile::from_toml_str(&source) {
            Err(TypusError::DuplicateSymbol { table, key }) => {
                assert_eq!(table, "symbols.complex");
                assert_eq!(key, "(c)");
            }
            other => panic!("Expected DuplicateSymbol error, got {other:?}"),
        }
    }

    #[test]
    fn test_symbol_value_must_be_one_char() {
        let source = config("[symbols.fractions]\n\"1/2\" = \"1/2\"\n");
        assert!(matches!(
            LocaleProfile::from_toml_str(&source),
            Err(TypusError::InvalidGlyph { .. })
        ));
    }

    #[test]
    fn test_duplicate_rule_is_rejected() {
        let source = config("").replace(
            r#"order = ["quotes", "spaces"]"#,
            r#"order = ["quotes", "spaces", "quotes"]"#,
        );
        match LocaleProfile::from_toml_str(&source) {
            Err(TypusError::DuplicateRule(name)) => assert_eq!(name, "quotes"),
            other => panic!("Expected DuplicateRule error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let source = config("").replace(
            r#"order = ["quotes", "spaces"]"#,
            r#"order = ["quotes", "hyphenation"]"#,
        );
        assert!(matches!(
            LocaleProfile::from_toml_str(&source),
            Err(TypusError::UnknownRule(name)) if name == "hyphenation"
        ));
    }

    #[test]
    fn test_listed_group_needs_its_table() {
        let source = config("").replace(
            r#"order = ["quotes", "spaces"]"#,
            r#"order = ["quotes", "vulgar_fractions"]"#,
        );
        match LocaleProfile::from_toml_str(&source) {
            Err(TypusError::MissingTable { rule, table }) => {
                assert_eq!(rule, "vulgar_fractions");
                assert_eq!(table, "fraction table");
            }
            other => panic!("Expected MissingTable error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_letters_class_is_rejected() {
        let source = config("[classes]\nletters = \"[a-\"\n");
        assert!(matches!(
            LocaleProfile::from_toml_str(&source),
            Err(TypusError::Pattern { .. })
        ));
    }

    #[test]
    fn test_symbol_lookup_ignores_case() {
        let source = config("[symbols.complex]\n\"(tm)\" = \"™\"\n\"(c)\" = \"©\"\n\"...\" = \"…\"\n");
        let profile = LocaleProfile::from_toml_str(&source).unwrap();
        let symbols = profile.complex_symbols();
        assert_eq!(symbols.lookup("(TM)"), Some('™'));
        assert_eq!(symbols.lookup("(C)"), Some('©'));
        assert_eq!(symbols.lookup("(x)"), None);
        assert_eq!(symbols.tokens()[0], "(tm)");
    }

    #[test]
    fn test_spacing_sides_include_both() {
        let source = config("[spacing.insert]\nbefore = \"→\"\nafter = \"←\"\nboth = \"≡\"\n");
        let profile = LocaleProfile::from_toml_str(&source).unwrap();
        assert_eq!(profile.insert_spaces().left_of(), "→≡");
        assert_eq!(profile.insert_spaces().right_of(), "←≡");
        assert!(profile.delete_spaces().left_of().is_empty());
    }

    #[test]
    fn test_code_override_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", config("")).unwrap();

        let profile = LocaleProfile::from_file(file.path(), Some("yy")).unwrap();
        assert_eq!(profile.code(), "yy");
    }
}
