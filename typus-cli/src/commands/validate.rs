//! Validate command implementation

use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use typus_core::{LocaleProfile, Typus};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to locale configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub locale_config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating locale configuration: {}",
            self.locale_config.display()
        );

        // Building the typographer compiles every rule of the profile
        let checked = LocaleProfile::from_file(&self.locale_config, None)
            .map(Arc::new)
            .and_then(|profile| Typus::new(Arc::clone(&profile)).map(|typus| (profile, typus)));

        match checked {
            Ok((profile, typus)) => {
                println!("✓ Configuration is valid!");
                println!("  Locale code: {}", profile.code());
                println!("  Locale name: {}", profile.name());
                println!("  Rule groups: {}", profile.rule_order().len());
                println!("  Stages: {}", typus.engine().len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(CliError::ValidationError(e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            locale_config: PathBuf::from("test.toml"),
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("test.toml"));
    }

    #[test]
    fn test_validate_valid_config() {
        let toml_content = r#"
[metadata]
code = "test"
name = "Test Locale"

[quotes]
odd = ["«", "»"]
even = ["„", "“"]

[rules]
order = ["quotes", "spaces"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            locale_config: temp_file.path().to_path_buf(),
        };

        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_invalid_config() {
        let toml_content = r#"
[metadata]
code = "test"
name = "Test"

[quotes]
odd = ["«", "»"]
even = ["„", "“"]

[rules]
order = ["quotes", "vulgar_fractions"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            locale_config: temp_file.path().to_path_buf(),
        };

        let error = args.execute().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::ValidationError(_))
        ));
    }
}
