//! Process command implementation

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader, STDIN_SOURCE};
use crate::locale_source::{Locale, LocaleSource};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use typus_core::{TransformOptions, Typus};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); reads stdin when omitted
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Built-in locale
    #[arg(short, long, value_enum, conflicts_with = "locale_config")]
    pub locale: Option<Locale>,

    /// External locale configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub locale_config: Option<PathBuf>,

    /// Override the code of an external locale
    #[arg(long, value_name = "CODE", requires = "locale_config")]
    pub locale_code: Option<String>,

    /// Phrase to leave untouched (repeatable)
    #[arg(short, long = "escape", value_name = "PHRASE")]
    pub escape: Vec<String>,

    /// Comma-separated tags whose content is left untouched
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub opaque_tags: Option<Vec<String>>,

    /// Render no-break spaces as `_`
    #[arg(short, long)]
    pub debug: bool,

    /// Typeset all inputs in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "TYPUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Typeset text, documents separated by a blank line
    Text,
    /// JSON array of documents with their source
    Json,
}

/// One input document
struct Document {
    source: String,
    text: String,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let source = self.locale_source(&config);
        log::info!("Locale: {}", source.display_name());
        let typus = self.build_typus(&source, &config)?;
        let options = self.transform_options(&config);

        let documents = self.read_documents()?;
        let mut formatter = self.create_formatter(&config)?;

        if self.parallel {
            let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
            let results = typus.transform_batch(&texts, &options);
            for (document, result) in documents.iter().zip(results) {
                formatter.format_document(&document.source, &result)?;
            }
        } else {
            let mut progress = ProgressReporter::new(self.quiet);
            progress.init_files(documents.len() as u64);

            for document in &documents {
                let result = typus.transform(&document.text, &options);
                formatter.format_document(&document.source, &result)?;
                progress.file_completed(&document.source);
            }

            progress.finish();
        }

        formatter.finish()?;
        log::info!("Typeset {} document(s)", documents.len());

        Ok(())
    }

    /// Flag first, then the config file's default
    fn locale_source(&self, config: &CliConfig) -> LocaleSource {
        if let Some(path) = &self.locale_config {
            return LocaleSource::External {
                path: path.clone(),
                locale_code: self.locale_code.clone(),
            };
        }

        match self.locale {
            Some(locale) => LocaleSource::BuiltIn(locale),
            None => LocaleSource::Named(config.processing.default_locale.clone()),
        }
    }

    fn build_typus(&self, source: &LocaleSource, config: &CliConfig) -> Result<Typus> {
        let mut builder = Typus::builder().profile(source.load()?);

        let tags = self
            .opaque_tags
            .as_ref()
            .or(config.shield.opaque_tags.as_ref());
        if let Some(tags) = tags {
            builder = builder.opaque_tags(tags.iter().cloned());
        }

        builder.build().context("Failed to build typographer")
    }

    fn transform_options(&self, config: &CliConfig) -> TransformOptions {
        TransformOptions::new()
            .escape_phrases(config.processing.escape_phrases.iter().cloned())
            .escape_phrases(self.escape.iter().cloned())
            .debug(self.debug || config.processing.debug)
    }

    fn read_documents(&self) -> Result<Vec<Document>> {
        if self.input.is_empty() || self.input == ["-"] {
            return Ok(vec![Document {
                source: STDIN_SOURCE.to_string(),
                text: FileReader::read_stdin()?,
            }]);
        }

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to process", files.len());

        files
            .iter()
            .map(|path| {
                Ok(Document {
                    source: path.display().to_string(),
                    text: FileReader::read_text(path)?,
                })
            })
            .collect()
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_str(&config.output.default_format, true)
                .map_err(|e| anyhow::anyhow!("Invalid default_format in config: {e}")),
        }
    }

    fn create_formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(match self.output_format(config)? {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
