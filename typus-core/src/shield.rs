//! Reversible protection of markup and literal phrases
//!
//! Protected substrings are swapped for placeholders such as `{#html0#}` or
//! `{#phrase3#}` before the rules run and swapped back afterwards. The
//! placeholder alphabet (braces, `#`, letters glued to digits) is matched by
//! no rule in the catalog.
//!
//! Restoration walks the registry backwards. A span registered later may
//! contain the placeholder of an earlier one, so undoing the later span first
//! exposes the earlier placeholder for the next step. Markup is registered
//! before phrases, so phrases are restored before markup.

use crate::error::{Result, TypusError};
use crate::rules::compile;
use regex::Regex;

/// Tags whose whole element, content included, is left untouched
pub const DEFAULT_OPAQUE_TAGS: &[&str] = &[
    "head", "iframe", "pre", "code", "script", "style", "video", "audio", "canvas",
];

/// Where a protected span came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Tags, opaque elements and comments
    Markup,
    /// Caller-supplied literal phrases
    Phrase,
}

impl SpanKind {
    fn label(self) -> &'static str {
        match self {
            SpanKind::Markup => "html",
            SpanKind::Phrase => "phrase",
        }
    }
}

/// A substring replaced by a placeholder for the duration of one transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: SpanKind,
    /// Placeholder standing in for `original`
    pub key: String,
    pub original: String,
}

/// Spans protected during one call, in registration order
#[derive(Debug, Default, Clone)]
pub struct Registry {
    spans: Vec<ProtectedSpan>,
    markup_ids: usize,
    phrase_ids: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, kind: SpanKind, original: &str) -> String {
        let counter = match kind {
            SpanKind::Markup => &mut self.markup_ids,
            SpanKind::Phrase => &mut self.phrase_ids,
        };
        let key = format!("{{#{}{}#}}", kind.label(), counter);
        *counter += 1;

        self.spans.push(ProtectedSpan {
            kind,
            key: key.clone(),
            original: original.to_string(),
        });
        key
    }

    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Markup patterns plus the phrase protocol
#[derive(Debug, Clone)]
pub struct Shield {
    opaque_tags: Vec<String>,
    patterns: Vec<Regex>,
}

impl Shield {
    /// Shield with [`DEFAULT_OPAQUE_TAGS`]
    pub fn with_default_tags() -> Result<Self> {
        Self::new(DEFAULT_OPAQUE_TAGS)
    }

    /// Shield treating `opaque_tags` as elements to protect whole.
    ///
    /// Nested elements of the same opaque tag are not supported: the first
    /// closing tag ends the span.
    pub fn new<S: AsRef<str>>(opaque_tags: &[S]) -> Result<Self> {
        let opaque_tags: Vec<String> = opaque_tags
            .iter()
            .map(|tag| tag.as_ref().trim().to_lowercase())
            .collect();

        if let Some(bad) = opaque_tags
            .iter()
            .find(|tag| tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(TypusError::Configuration(format!(
                "Invalid opaque tag name: {bad:?}"
            )));
        }

        let mut patterns = Vec::with_capacity(3);
        if !opaque_tags.is_empty() {
            let elements = opaque_tags
                .iter()
                .map(|tag| format!("<{tag}.*?>.*?</{tag}>"))
                .collect::<Vec<_>>()
                .join("|");
            patterns.push(compile("shield:opaque", &elements)?);
        }
        // Doctype, processing instruction, closing tag, any other tag
        patterns.push(compile("shield:tag", r"<[!?/]?[a-z]+.*?>")?);
        patterns.push(compile("shield:comment", r"<!--.*?-->")?);

        Ok(Self {
            opaque_tags,
            patterns,
        })
    }

    pub fn opaque_tags(&self) -> &[String] {
        &self.opaque_tags
    }

    /// Protect markup, then `phrases`
    pub fn protect<S: AsRef<str>>(&self, text: &str, phrases: &[S]) -> (String, Registry) {
        let mut registry = Registry::new();
        let shielded = self.protect_markup(text, &mut registry);
        let shielded = protect_phrases(&shielded, phrases, &mut registry);
        (shielded, registry)
    }

    /// Replace every markup match with a placeholder, pattern by pattern
    pub fn protect_markup(&self, text: &str, registry: &mut Registry) -> String {
        let mut current = text.to_string();

        for pattern in &self.patterns {
            if !pattern.is_match(&current) {
                continue;
            }
            current = pattern
                .replace_all(&current, |caps: &regex::Captures<'_>| {
                    let whole = caps.get(0).map_or("", |m| m.as_str());
                    registry.register(SpanKind::Markup, whole)
                })
                .into_owned();
        }

        current
    }

    /// Put every span back, newest first
    pub fn restore(&self, text: &str, registry: &Registry) -> String {
        registry
            .spans
            .iter()
            .rev()
            .fold(text.to_string(), |acc, span| acc.replace(&span.key, &span.original))
    }
}

/// Replace every occurrence of each phrase with one shared placeholder.
///
/// Blank phrases and phrases absent from the text are skipped.
pub fn protect_phrases<S: AsRef<str>>(text: &str, phrases: &[S], registry: &mut Registry) -> String {
    let mut current = text.to_string();

    for phrase in phrases {
        let phrase = phrase.as_ref();
        if phrase.trim().is_empty() || !current.contains(phrase) {
            continue;
        }
        let key = registry.register(SpanKind::Phrase, phrase);
        current = current.replace(phrase, &key);
    }

    current
}
