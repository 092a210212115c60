//! Typus orchestrator
//!
//! Wires a locale profile, a markup shield and a rule engine into
//! [`Typus::transform`]. Everything is built once; a `Typus` is immutable
//! and can be shared between threads.

use crate::chars::{DEBUG_SPACE, NBSP, NNBSP};
use crate::error::{Result, TypusError};
use crate::locale::{get_profile, LocaleProfile};
use crate::rules::RuleEngine;
use crate::shield::{protect_phrases, Registry, Shield, DEFAULT_OPAQUE_TAGS};
use std::sync::{Arc, OnceLock};

/// Per-call options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    escape_phrases: Vec<String>,
    debug: bool,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Protect one literal phrase from every rule
    pub fn escape_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.escape_phrases.push(phrase.into());
        self
    }

    /// Protect several literal phrases from every rule
    pub fn escape_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.escape_phrases.extend(phrases.into_iter().map(Into::into));
        self
    }

    /// Render no-break spaces as `_`
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn phrases(&self) -> &[String] {
        &self.escape_phrases
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

/// Typographic transformer for one locale
#[derive(Debug)]
pub struct Typus {
    profile: Arc<LocaleProfile>,
    shield: Shield,
    engine: RuleEngine,
}

impl Typus {
    /// Transformer over `profile` with the default opaque tags
    pub fn new(profile: Arc<LocaleProfile>) -> Result<Self> {
        Self::builder().profile(profile).build()
    }

    pub fn builder() -> TypusBuilder {
        TypusBuilder::default()
    }

    /// Transformer for an embedded locale
    pub fn for_locale(code: &str) -> Result<Self> {
        Self::builder().locale(code).build()
    }

    pub fn russian() -> Result<Self> {
        Self::for_locale("ru")
    }

    pub fn english() -> Result<Self> {
        Self::for_locale("en")
    }

    pub fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    pub fn shield(&self) -> &Shield {
        &self.shield
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Typeset `text`.
    ///
    /// Input is trimmed first, blank input yields an empty string. Markup and
    /// escaped phrases come back byte-identical.
    pub fn transform(&self, text: &str, options: &TransformOptions) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }

        let mut registry = Registry::new();
        let shielded = self.shield.protect_markup(text, &mut registry);
        let shielded = protect_phrases(&shielded, options.phrases(), &mut registry);

        let mut processed = self.engine.apply(&shielded);

        // Placeholders carry no spaces, so markers never leak into restored spans
        if options.is_debug() {
            processed = processed.replace(
                |ch: char| ch == NBSP || ch == NNBSP,
                &DEBUG_SPACE.to_string(),
            );
        }

        self.shield.restore(&processed, &registry)
    }

    /// Transform many texts over the shared engine
    #[cfg(feature = "parallel")]
    pub fn transform_batch<S>(&self, texts: &[S], options: &TransformOptions) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        texts
            .par_iter()
            .map(|text| self.transform(text.as_ref(), options))
            .collect()
    }

    /// Transform many texts one after another
    #[cfg(not(feature = "parallel"))]
    pub fn transform_batch<S>(&self, texts: &[S], options: &TransformOptions) -> Vec<String>
    where
        S: AsRef<str>,
    {
        texts
            .iter()
            .map(|text| self.transform(text.as_ref(), options))
            .collect()
    }
}

/// Builder for [`Typus`]
#[derive(Debug, Default)]
pub struct TypusBuilder {
    locale: Option<String>,
    profile: Option<Arc<LocaleProfile>>,
    opaque_tags: Option<Vec<String>>,
}

impl TypusBuilder {
    /// Use an embedded locale by code or English name
    pub fn locale(mut self, code: impl Into<String>) -> Self {
        self.locale = Some(code.into());
        self
    }

    /// Use a custom profile; takes precedence over [`Self::locale`]
    pub fn profile(mut self, profile: Arc<LocaleProfile>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Replace the default opaque tags
    pub fn opaque_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opaque_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Typus> {
        let profile = match (self.profile, self.locale) {
            (Some(profile), _) => profile,
            (None, Some(code)) => get_profile(&code)?,
            (None, None) => {
                return Err(TypusError::Configuration(
                    "No locale or profile specified".to_string(),
                ))
            }
        };

        let shield = match &self.opaque_tags {
            Some(tags) => Shield::new(tags.as_slice())?,
            None => Shield::new(DEFAULT_OPAQUE_TAGS)?,
        };
        let engine = RuleEngine::new(&profile)?;

        Ok(Typus {
            profile,
            shield,
            engine,
        })
    }
}

static RU_TYPUS: OnceLock<Typus> = OnceLock::new();
static EN_TYPUS: OnceLock<Typus> = OnceLock::new();

fn shared(cell: &'static OnceLock<Typus>, code: &str) -> Result<&'static Typus> {
    if let Some(typus) = cell.get() {
        return Ok(typus);
    }
    let typus = Typus::for_locale(code)?;
    Ok(cell.get_or_init(|| typus))
}

/// Typeset Russian text with default options
pub fn ru_typus(text: &str) -> Result<String> {
    Ok(shared(&RU_TYPUS, "ru")?.transform(text, &TransformOptions::default()))
}

/// Typeset English text with default options
pub fn en_typus(text: &str) -> Result<String> {
    Ok(shared(&EN_TYPUS, "en")?.transform(text, &TransformOptions::default()))
}
