//! Configuration module
//!
//! Defaults for the `process` command, read from an optional TOML file.
//! Command-line flags take precedence over every value here.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Markup shield configuration
    #[serde(default)]
    pub shield: ShieldConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&source)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())).into())
    }
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Default locale code or name
    pub default_locale: String,

    /// Render no-break spaces as `_`
    pub debug: bool,

    /// Phrases protected from every rule
    pub escape_phrases: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_locale: "ru".to_string(),
            debug: false,
            escape_phrases: Vec::new(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Markup shield configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ShieldConfig {
    /// Opaque tags replacing the built-in list
    pub opaque_tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.processing.default_locale, "ru");
        assert!(config.output.pretty_json);
        assert!(config.shield.opaque_tags.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
[processing]
default_locale = "en"
escape_phrases = ["(c)"]

[shield]
opaque_tags = ["kbd"]
"#,
        )
        .unwrap();

        assert_eq!(config.processing.default_locale, "en");
        assert!(!config.processing.debug);
        assert_eq!(config.processing.escape_phrases, ["(c)"]);
        assert_eq!(config.output.default_format, "text");
        assert_eq!(config.shield.opaque_tags.as_deref(), Some(&["kbd".to_string()][..]));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("typus.toml");
        fs::write(&path, "[processing\n").unwrap();

        let error = CliConfig::load(&path).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let error = CliConfig::load(Path::new("/nonexistent/typus.toml")).unwrap_err();
        assert!(error.to_string().contains("Failed to read config"));
    }
}
