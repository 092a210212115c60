//! Pattern to replacement rules
//!
//! The `regex` crate has no look-around, so context conditions are checked
//! at the match edges: look-ahead against the text after the match,
//! look-behind against the single character before it. A match whose
//! context fails is skipped and the search resumes one character later.

use super::{compile, Stage};
use crate::error::Result;
use crate::locale::SymbolMap;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// What a match is replaced with
#[derive(Clone)]
pub enum Replacement {
    /// Literal template, `${n}` expands to capture group `n`
    Template(String),
    /// Template unless capture `group`, lowercased, is one of `exceptions`
    TemplateUnless {
        template: String,
        group: usize,
        exceptions: HashSet<String>,
    },
    /// Capture group 1 looked up in a symbol table
    Lookup(SymbolMap),
    /// Pure function of the captures
    Computed(fn(&Captures<'_>) -> String),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Replacement::TemplateUnless {
                template,
                group,
                exceptions,
            } => f
                .debug_struct("TemplateUnless")
                .field("template", template)
                .field("group", group)
                .field("exceptions", exceptions)
                .finish(),
            Replacement::Lookup(map) => f.debug_tuple("Lookup").field(&map.len()).finish(),
            Replacement::Computed(_) => f.write_str("Computed"),
        }
    }
}

impl Replacement {
    fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        let whole = caps.get(0).map_or("", |m| m.as_str());

        match self {
            Replacement::Template(template) => caps.expand(template, dst),
            Replacement::TemplateUnless {
                template,
                group,
                exceptions,
            } => {
                let exempt = caps
                    .get(*group)
                    .is_some_and(|m| exceptions.contains(&m.as_str().to_lowercase()));
                if exempt {
                    dst.push_str(whole);
                } else {
                    caps.expand(template, dst);
                }
            }
            Replacement::Lookup(map) => {
                let token = caps.get(1).map_or(whole, |m| m.as_str());
                match map.lookup(token) {
                    Some(glyph) => dst.push(glyph),
                    None => dst.push_str(whole),
                }
            }
            Replacement::Computed(f) => dst.push_str(&f(caps)),
        }
    }
}

/// Context condition checked around a match
#[derive(Debug, Clone)]
pub enum Look {
    /// Text after the match starts with the pattern
    Ahead(Regex),
    /// Text after the match does not start with the pattern
    NotAhead(Regex),
    /// Character before the match matches the pattern
    Behind(Regex),
    /// No character before the match, or it does not match the pattern
    NotBehind(Regex),
}

impl Look {
    fn allows(&self, text: &str, start: usize, end: usize) -> bool {
        match self {
            Look::Ahead(re) => re.is_match(&text[end..]),
            Look::NotAhead(re) => !re.is_match(&text[end..]),
            Look::Behind(re) => preceding_matches(re, text, start),
            Look::NotBehind(re) => !preceding_matches(re, text, start),
        }
    }
}

fn preceding_matches(re: &Regex, text: &str, start: usize) -> bool {
    let mut buf = [0u8; 4];
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|ch| re.is_match(ch.encode_utf8(&mut buf)))
}

/// A named pattern, its context conditions and its replacement
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    pattern: Regex,
    context: Vec<Look>,
    replacement: Replacement,
}

impl Rule {
    /// Start building a rule
    pub fn builder(name: impl Into<String>, pattern: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            name: name.into(),
            pattern: pattern.into(),
            context: Vec::new(),
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    fn context_allows(&self, text: &str, start: usize, end: usize) -> bool {
        self.context.iter().all(|look| look.allows(text, start, end))
    }
}

impl Stage for Rule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut out: Option<String> = None;
        let mut last = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let (start, end) = (whole.start(), whole.end());

            if !self.context_allows(text, start, end) {
                pos = next_char_boundary(text, start);
                continue;
            }

            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..start]);
            self.replacement.expand(&caps, buf);
            last = end;
            pos = if end > start {
                end
            } else {
                next_char_boundary(text, end)
            };
        }

        match out {
            None => Cow::Borrowed(text),
            Some(mut buf) => {
                buf.push_str(&text[last..]);
                Cow::Owned(buf)
            }
        }
    }
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |ch| pos + ch.len_utf8())
}

#[derive(Debug, Clone, Copy)]
enum LookKind {
    Ahead,
    NotAhead,
    Behind,
    NotBehind,
}

/// Fluent builder for [`Rule`]; the terminal methods compile the patterns
#[derive(Debug)]
pub struct RuleBuilder {
    name: String,
    pattern: String,
    context: Vec<(LookKind, String)>,
}

impl RuleBuilder {
    /// Require the text after the match to start with `pattern`
    pub fn followed_by(mut self, pattern: impl Into<String>) -> Self {
        self.context.push((LookKind::Ahead, pattern.into()));
        self
    }

    /// Forbid the text after the match to start with `pattern`
    pub fn not_followed_by(mut self, pattern: impl Into<String>) -> Self {
        self.context.push((LookKind::NotAhead, pattern.into()));
        self
    }

    /// Require the character before the match to match `class`
    pub fn preceded_by(mut self, class: impl Into<String>) -> Self {
        self.context.push((LookKind::Behind, class.into()));
        self
    }

    /// Forbid the character before the match to match `class`
    pub fn not_preceded_by(mut self, class: impl Into<String>) -> Self {
        self.context.push((LookKind::NotBehind, class.into()));
        self
    }

    pub fn template(self, template: impl Into<String>) -> Result<Rule> {
        self.build(Replacement::Template(template.into()))
    }

    pub fn template_unless<I, S>(
        self,
        template: impl Into<String>,
        group: usize,
        exceptions: I,
    ) -> Result<Rule>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build(Replacement::TemplateUnless {
            template: template.into(),
            group,
            exceptions: exceptions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        })
    }

    pub fn lookup(self, map: SymbolMap) -> Result<Rule> {
        self.build(Replacement::Lookup(map))
    }

    pub fn computed(self, f: fn(&Captures<'_>) -> String) -> Result<Rule> {
        self.build(Replacement::Computed(f))
    }

    fn build(self, replacement: Replacement) -> Result<Rule> {
        let pattern = compile(&self.name, &self.pattern)?;

        let context = self
            .context
            .into_iter()
            .map(|(kind, p)| -> Result<Look> {
                let re = match kind {
                    LookKind::Ahead | LookKind::NotAhead => {
                        compile(&self.name, &format!(r"\A(?:{p})"))?
                    }
                    LookKind::Behind | LookKind::NotBehind => {
                        compile(&self.name, &format!(r"\A(?:{p})\z"))?
                    }
                };
                Ok(match kind {
                    LookKind::Ahead => Look::Ahead(re),
                    LookKind::NotAhead => Look::NotAhead(re),
                    LookKind::Behind => Look::Behind(re),
                    LookKind::NotBehind => Look::NotBehind(re),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Rule {
            name: self.name,
            pattern,
            context,
            replacement,
        })
    }
}
