//! Generate config command implementation

use crate::locale_source::Locale;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use typus_core::locale::embedded_source;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Locale code for the new configuration
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub locale_code: String,

    /// Built-in locale to start from
    #[arg(short, long, value_enum, default_value = "russian")]
    pub base: Locale,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating locale configuration template...");
        println!("  Locale code: {}", self.locale_code);
        println!("  Based on: {}", self.base.as_str());
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the quote glyphs, symbol tables and rule order");
        println!("2. Validate your configuration:");
        println!(
            "   typus validate --locale-config {}",
            self.output.display()
        );
        println!("3. Use it for processing:");
        println!(
            "   typus process -i input.txt --locale-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// The base locale's document with the new code and a generic name
    fn generate_template(&self) -> Result<String> {
        let source = embedded_source(self.base.code())
            .with_context(|| format!("No embedded source for {}", self.base.as_str()))?;

        let mut in_metadata = false;
        let mut lines = Vec::new();
        for line in source.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with('[') {
                in_metadata = trimmed.starts_with("[metadata]");
            }

            let line = if in_metadata && trimmed.starts_with("code =") {
                format!("code = \"{}\"", self.locale_code)
            } else if in_metadata && trimmed.starts_with("name =") {
                "name = \"Custom Locale\"".to_string()
            } else if let Some(title) = trimmed.strip_prefix("# Typus locale configuration:") {
                format!("# Locale configuration for {} (from{title})", self.locale_code)
            } else {
                line.to_string()
            };
            lines.push(line);
        }

        let mut template = lines.join("\n");
        template.push('\n');
        Ok(template)
    }
}
