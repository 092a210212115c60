//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use typus_core::rules::catalog;
use typus_core::{get_profile, list_available_locales};

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Typeset text files or standard input
    Process(process::ProcessArgs),

    /// Validate a locale configuration file
    Validate(validate::ValidateArgs),

    /// Write a locale configuration template based on a built-in locale
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in locales
    Locales,

    /// List rule groups, in application order when a locale is given
    Rules {
        /// Locale code or name
        #[arg(short, long, value_name = "CODE")]
        locale: Option<String>,
    },
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Locales => {
                println!("Available locales:");
                for code in list_available_locales() {
                    let profile = get_profile(code)?;
                    println!("  {:<4} {}", code, profile.name());
                }
            }
            ListCommands::Rules { locale: Some(code) } => {
                let profile = get_profile(code)?;
                println!("Rule groups for {} ({}):", profile.name(), profile.code());
                for (position, name) in profile.rule_order().iter().enumerate() {
                    println!("  {:>2}. {}", position + 1, name);
                }
            }
            ListCommands::Rules { locale: None } => {
                println!("Available rule groups:");
                for name in catalog::names() {
                    println!("  {name}");
                }
            }
        }

        Ok(())
    }
}

impl Commands {
    /// Dispatch to the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}
