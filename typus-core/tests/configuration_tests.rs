//! Loading custom locales from TOML and rejecting broken ones

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use typus_core::locale::embedded_source;
use typus_core::{list_available_locales, LocaleProfile, TransformOptions, Typus, TypusError};

const GERMAN: &str = r#"
[metadata]
code = "de"
name = "German"

[quotes]
odd = ["„", "“"]
even = ["‚", "‘"]

[rules]
order = ["quotes", "complex_symbols"]

[symbols.complex]
"(c)" = "©"
"#;

fn write_config(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

fn with_order(order: &str) -> String {
    GERMAN.replace(r#"["quotes", "complex_symbols"]"#, order)
}

#[test]
fn test_custom_locale_from_file() {
    let file = write_config(GERMAN);
    let profile = LocaleProfile::from_file(file.path(), None).unwrap();
    assert_eq!(profile.code(), "de");
    assert_eq!(profile.name(), "German");
    assert_eq!(profile.rule_order(), ["quotes", "complex_symbols"]);

    let typus = Typus::new(Arc::new(profile)).unwrap();
    assert_eq!(
        typus.transform(r#""Hallo" (c)"#, &TransformOptions::new()),
        "„Hallo“ ©"
    );
    let stages: Vec<&str> = typus.engine().stage_names().collect();
    assert_eq!(stages, ["quotes", "complex_symbols"]);
}

#[test]
fn test_code_override() {
    let file = write_config(GERMAN);
    let profile = LocaleProfile::from_file(file.path(), Some("de-at")).unwrap();
    assert_eq!(profile.code(), "de-at");
}

#[test]
fn test_custom_locale_nests_with_its_own_glyphs() {
    let profile = LocaleProfile::from_toml_str(GERMAN).unwrap();
    let typus = Typus::new(Arc::new(profile)).unwrap();
    assert_eq!(
        typus.transform(r#""a 'b' c""#, &TransformOptions::new()),
        "„a ‚b‘ c“"
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = LocaleProfile::from_file(dir.path().join("absent.toml"), None);
    assert!(matches!(result, Err(TypusError::Io(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = LocaleProfile::from_toml_str("[metadata\ncode = ");
    assert!(matches!(result, Err(TypusError::Parse(_))));
}

#[test]
fn test_unknown_rule_is_rejected() {
    let result = LocaleProfile::from_toml_str(&with_order(r#"["quotes", "dashes"]"#));
    match result {
        Err(TypusError::UnknownRule(name)) => assert_eq!(name, "dashes"),
        other => panic!("Expected UnknownRule, got {other:?}"),
    }
}

#[test]
fn test_duplicate_rule_is_rejected() {
    let result = LocaleProfile::from_toml_str(&with_order(r#"["quotes", "quotes"]"#));
    assert!(matches!(result, Err(TypusError::DuplicateRule(name)) if name == "quotes"));
}

#[test]
fn test_empty_rule_order_is_rejected() {
    let result = LocaleProfile::from_toml_str(&with_order("[]"));
    assert!(matches!(result, Err(TypusError::Configuration(_))));
}

#[test]
fn test_group_without_its_table_is_rejected() {
    let result = LocaleProfile::from_toml_str(&with_order(r#"["quotes", "math"]"#));
    match result {
        Err(TypusError::MissingTable { rule, table }) => {
            assert_eq!(rule, "math");
            assert_eq!(table, "math sign table");
        }
        other => panic!("Expected MissingTable, got {other:?}"),
    }

    let result = LocaleProfile::from_toml_str(&with_order(r#"["ruble"]"#));
    assert!(matches!(result, Err(TypusError::MissingTable { .. })));
}

#[test]
fn test_quote_glyphs_must_be_distinct_chars() {
    let repeated = GERMAN.replace(r#"even = ["‚", "‘"]"#, r#"even = ["„", "‘"]"#);
    assert!(matches!(
        LocaleProfile::from_toml_str(&repeated),
        Err(TypusError::QuoteGlyphs(_))
    ));

    let long = GERMAN.replace(r#"even = ["‚", "‘"]"#, r#"even = ["<<", ">>"]"#);
    assert!(matches!(
        LocaleProfile::from_toml_str(&long),
        Err(TypusError::QuoteGlyphs(_))
    ));
}

#[test]
fn test_symbol_must_map_to_one_char() {
    let source = GERMAN.replace(r#""(c)" = "©""#, r#""(c)" = "(C)""#);
    match LocaleProfile::from_toml_str(&source) {
        Err(TypusError::InvalidGlyph { table, key, value }) => {
            assert_eq!(table, "symbols.complex");
            assert_eq!(key, "(c)");
            assert_eq!(value, "(C)");
        }
        other => panic!("Expected InvalidGlyph, got {other:?}"),
    }
}

#[test]
fn test_symbols_collide_case_insensitively() {
    let source = format!("{GERMAN}\"(C)\" = \"©\"\n");
    assert!(matches!(
        LocaleProfile::from_toml_str(&source),
        Err(TypusError::DuplicateSymbol { key, .. }) if key == "(c)"
    ));
}

#[test]
fn test_invalid_letter_class_is_rejected() {
    let source = format!("{GERMAN}\n[classes]\nletters = \"[a-\"\n");
    assert!(matches!(
        LocaleProfile::from_toml_str(&source),
        Err(TypusError::Pattern { .. })
    ));
}

#[test]
fn test_embedded_sources_are_valid_templates() {
    for code in list_available_locales() {
        let source = embedded_source(code).unwrap();
        let profile = LocaleProfile::from_toml_str(source).unwrap();
        assert_eq!(profile.code(), code);
        assert_eq!(profile.rule_order().len(), 18);
    }
}
