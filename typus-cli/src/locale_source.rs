//! Locale source management for CLI

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use typus_core::{get_profile, LocaleProfile};

/// Embedded locales selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    /// Russian typography
    #[value(alias = "ru")]
    Russian,
    /// English typography
    #[value(alias = "en")]
    English,
}

impl Locale {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Russian => "Russian",
            Locale::English => "English",
        }
    }

    /// Get locale code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Russian => "ru",
            Locale::English => "en",
        }
    }
}

/// Source of a locale profile
#[derive(Debug, Clone)]
pub enum LocaleSource {
    /// Locale chosen by flag
    BuiltIn(Locale),
    /// Locale named in the CLI configuration file
    Named(String),
    /// External configuration file
    External {
        /// Path to the configuration file
        path: PathBuf,
        /// Optional locale code override
        locale_code: Option<String>,
    },
}

impl LocaleSource {
    /// Get the display name for the locale source
    pub fn display_name(&self) -> String {
        match self {
            LocaleSource::BuiltIn(locale) => format!("Built-in: {}", locale.as_str()),
            LocaleSource::Named(code) => format!("Built-in: {code}"),
            LocaleSource::External { path, locale_code } => {
                if let Some(code) = locale_code {
                    format!("External: {} (code: {})", path.display(), code)
                } else {
                    format!("External: {}", path.display())
                }
            }
        }
    }

    /// Build or fetch the profile
    pub fn load(&self) -> Result<Arc<LocaleProfile>> {
        match self {
            LocaleSource::BuiltIn(locale) => Ok(get_profile(locale.code())?),
            LocaleSource::Named(code) => Ok(get_profile(code)?),
            LocaleSource::External { path, locale_code } => {
                let profile = LocaleProfile::from_file(path, locale_code.as_deref())
                    .with_context(|| format!("Failed to load locale from {}", path.display()))?;
                Ok(Arc::new(profile))
            }
        }
    }
}
