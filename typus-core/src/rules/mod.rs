//! Ordered substitution rules
//!
//! A rule engine is a list of [`Stage`]s applied one after another; each
//! stage runs to exhaustion before the next one sees the text. Most stages
//! are regex [`Rule`]s, the quote resolver is one more stage placed by name
//! in the locale's rule order.

pub mod catalog;
mod engine;
mod rule;

pub use engine::RuleEngine;
pub use rule::{Look, Replacement, Rule, RuleBuilder};

use crate::error::{Result, TypusError};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// A uniform text transformation step
pub trait Stage: Send + Sync {
    /// Name used in logs and listings
    fn name(&self) -> &str;

    /// Transform `text`, borrowing it back when nothing changed
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str>;
}

/// Compile a rule pattern with the engine-wide flags:
/// case-insensitive, `^`/`$` per line, `.` across lines.
pub(crate) fn compile(rule: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|source| TypusError::Pattern {
            rule: rule.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_flags() {
        let re = compile("test", r"^abc.x$").unwrap();
        assert!(re.is_match("zzz\nABC\nX\nzzz"));
    }

    #[test]
    fn test_compile_reports_rule_name() {
        match compile("broken", "(") {
            Err(TypusError::Pattern { rule, .. }) => assert_eq!(rule, "broken"),
            other => panic!("Expected Pattern error, got {other:?}"),
        }
    }
}
