//! Embedded locale loader
//!
//! Parses the compiled-in TOML documents once and hands out shared profiles.

use crate::error::{Result, TypusError};
use crate::locale::profile::LocaleProfile;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static EMBEDDED: OnceLock<HashMap<&'static str, Arc<LocaleProfile>>> = OnceLock::new();

macro_rules! embed_locale_config {
    ($code:expr, $alias:expr, $path:expr) => {
        ($code, $alias, include_str!($path))
    };
}

const EMBEDDED_SOURCES: [(&str, &str, &str); 2] = [
    embed_locale_config!("ru", "russian", "../../configs/locales/russian.toml"),
    embed_locale_config!("en", "english", "../../configs/locales/english.toml"),
];

fn load_embedded() -> HashMap<&'static str, Arc<LocaleProfile>> {
    let mut profiles = HashMap::new();

    for (code, alias, source) in EMBEDDED_SOURCES {
        match load_embedded_locale(code, source) {
            Ok(profile) => {
                let profile = Arc::new(profile);
                profiles.insert(alias, Arc::clone(&profile));
                profiles.insert(code, profile);
            }
            Err(e) => {
                log::error!("failed to load embedded locale '{code}': {e}");
            }
        }
    }

    profiles
}

fn load_embedded_locale(code: &str, source: &str) -> Result<LocaleProfile> {
    let profile = LocaleProfile::from_toml_str(source)?;

    // The table key and the document must agree
    if profile.code() != code {
        return Err(TypusError::Configuration(format!(
            "Config code mismatch: expected {}, got {}",
            code,
            profile.code()
        )));
    }

    Ok(profile)
}

/// Shared profile of an embedded locale, by code or English name
pub fn get_profile(code: &str) -> Result<Arc<LocaleProfile>> {
    EMBEDDED
        .get_or_init(load_embedded)
        .get(code.to_lowercase().as_str())
        .cloned()
        .ok_or_else(|| TypusError::UnsupportedLocale(code.to_string()))
}

/// Codes of the embedded locales, sorted
pub fn list_available_locales() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = EMBEDDED_SOURCES.iter().map(|(code, _, _)| *code).collect();
    codes.sort_unstable();
    codes
}

/// Raw TOML source of an embedded locale, usable as a template
pub fn embedded_source(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    EMBEDDED_SOURCES
        .iter()
        .find(|(c, alias, _)| *c == code || *alias == code)
        .map(|(_, _, source)| *source)
}
