//! Quote nesting resolver
//!
//! Quotes are resolved innermost first. Every recognized quote glyph is
//! normalized to a straight marker, then each pass wraps every innermost
//! quoted span in the odd-level pair until a pass changes nothing. When
//! more than one pass was needed, all placed glyphs are odd-level and one
//! left-to-right walk alternates them into odd and even levels.

use crate::chars::{DOUBLE_MARKER, QUOTE_GLYPHS, QUOTE_MARKER};
use crate::locale::QuoteGlyphs;
use crate::rules::Stage;
use std::borrow::Cow;

/// Upper bound of collapse passes; reaching it counts as convergence
pub const MAX_PASSES: usize = 128;

/// Resolves straight and mixed-style quotes into a locale's glyph pairs
#[derive(Debug, Clone)]
pub struct QuoteResolver {
    glyphs: QuoteGlyphs,
    recognized: Vec<char>,
}

impl QuoteResolver {
    pub fn new(glyphs: QuoteGlyphs) -> Self {
        let mut recognized: Vec<char> = QUOTE_GLYPHS.to_vec();
        for glyph in glyphs.as_array() {
            if !recognized.contains(&glyph) {
                recognized.push(glyph);
            }
        }

        Self { glyphs, recognized }
    }

    pub fn glyphs(&self) -> QuoteGlyphs {
        self.glyphs
    }

    /// Resolve every quote in `text`
    pub fn resolve(&self, text: &str) -> String {
        let mut current = self.normalize(text);
        let mut passes = 0;

        while passes < MAX_PASSES {
            let (next, replaced) = self.collapse(&current);
            if replaced == 0 {
                break;
            }
            current = next;
            passes += 1;
        }

        if passes == MAX_PASSES {
            log::warn!("quote resolution stopped after {MAX_PASSES} passes");
        }
        log::trace!("quote resolution took {passes} passes");

        // One pass means no nesting, the odd pair is already right
        if passes < 2 {
            return current;
        }

        self.relevel(&current)
    }

    fn normalize(&self, text: &str) -> String {
        text.chars()
            .map(|ch| {
                if self.recognized.contains(&ch) {
                    QUOTE_MARKER
                } else {
                    ch
                }
            })
            .collect()
    }

    /// Wrap every innermost quoted span in the odd-level pair
    fn collapse(&self, text: &str) -> (String, usize) {
        let mut out = String::with_capacity(text.len());
        let mut replaced = 0;
        let mut last = 0;
        let mut pos = 0;

        while let Some(offset) = text[pos..].find(is_marker) {
            let open = pos + offset;

            match closing_marker(text, open) {
                Some(close) => {
                    out.push_str(&text[last..open]);
                    out.push(self.glyphs.odd_left);
                    out.push_str(&text[open + 1..close]);
                    out.push(self.glyphs.odd_right);
                    last = close + 1;
                    pos = close + 1;
                    replaced += 1;
                }
                None => pos = open + 1,
            }
        }

        out.push_str(&text[last..]);
        (out, replaced)
    }

    /// Alternate odd-level glyphs into odd and even levels
    fn relevel(&self, text: &str) -> String {
        let QuoteGlyphs {
            odd_left,
            odd_right,
            even_left,
            even_right,
        } = self.glyphs;
        let rotation = [(odd_left, even_right), (even_left, odd_right)];
        let mut seen = 0;

        text.chars()
            .map(|ch| {
                if ch != odd_left && ch != odd_right {
                    return ch;
                }
                let (left, right) = rotation[seen % 2];
                seen += 1;
                if ch == odd_left {
                    left
                } else {
                    right
                }
            })
            .collect()
    }
}

impl Stage for QuoteResolver {
    fn name(&self) -> &str {
        "quotes"
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text
            .chars()
            .any(|ch| is_marker(ch) || self.recognized.contains(&ch))
        {
            return Cow::Borrowed(text);
        }

        let resolved = self.resolve(text);
        if resolved == text {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(resolved)
        }
    }
}

fn is_marker(ch: char) -> bool {
    ch == QUOTE_MARKER || ch == DOUBLE_MARKER
}

fn is_word(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Byte offset of the marker closing the span opened at `open`.
///
/// The opening marker must not follow a word character and must be followed
/// by a non-space character other than itself. The span closes at the first
/// marker of the same kind that neither follows whitespace nor is followed by
/// a word character, so apostrophes inside a quote do not end it.
fn closing_marker(text: &str, open: usize) -> Option<usize> {
    let marker = text[open..].chars().next()?;

    if text[..open].chars().next_back().is_some_and(is_word) {
        return None;
    }

    let content = open + marker.len_utf8();
    let first = text[content..].chars().next()?;
    if first == marker || first.is_whitespace() {
        return None;
    }

    let mut search = content + first.len_utf8();
    while let Some(offset) = text[search..].find(marker) {
        let close = search + offset;
        let after = close + marker.len_utf8();
        let spaced = text[..close].chars().next_back().is_some_and(char::is_whitespace);
        if !spaced && !text[after..].chars().next().is_some_and(is_word) {
            return Some(close);
        }
        search = after;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ru() -> QuoteResolver {
        QuoteResolver::new(QuoteGlyphs {
            odd_left: '«',
            odd_right: '»',
            even_left: '„',
            even_right: '“',
        })
    }

    #[test]
    fn test_single_level() {
        assert_eq!(ru().resolve(r#"Say "what" again!"#), "Say «what» again!");
        assert_eq!(ru().resolve("'single'"), "«single»");
    }

    #[test]
    fn test_two_levels_alternate() {
        assert_eq!(ru().resolve(r#""a 'b' c""#), "«a „b“ c»");
    }

    #[test]
    fn test_third_level_reuses_odd_pair() {
        assert_eq!(ru().resolve(r#""a 'b "c" d' e""#), "«a „b «c» d“ e»");
    }

    #[test]
    fn test_mixed_styles_are_normalized() {
        assert_eq!(ru().resolve("“a ‘b’ c”"), "«a „b“ c»");
        assert_eq!(ru().resolve("«a»"), "«a»");
    }

    #[test]
    fn test_unbalanced_marker_is_left_alone() {
        assert_eq!(ru().resolve(r#"a "b c"#), r#"a "b c"#);
    }

    #[test]
    fn test_numeral_marks_are_not_quotes() {
        assert_eq!(ru().resolve(r#"5" and 6""#), r#"5" and 6""#);
    }

    #[test]
    fn test_apostrophe_inside_quotes() {
        assert_eq!(ru().resolve("'it's fine'"), "«it's fine»");
    }

    #[test]
    fn test_leading_space_blocks_opening() {
        assert_eq!(ru().resolve(r#"" a""#), r#"" a""#);
    }

    #[test]
    fn test_trailing_space_blocks_closing() {
        assert_eq!(ru().resolve("'foo ' bar"), "'foo ' bar");
        assert_eq!(ru().resolve(r#""a b" "c ""#), r#"«a b» "c ""#);
        assert_eq!(ru().resolve("'foo ' bar'"), "«foo ' bar»");
    }

    #[test]
    fn test_stage_borrows_quote_free_text() {
        let resolver = ru();
        assert!(matches!(resolver.apply("no quotes"), Cow::Borrowed(_)));
        assert!(matches!(resolver.apply("«a»"), Cow::Borrowed(_)));
        assert!(matches!(resolver.apply(r#""a""#), Cow::Owned(_)));
    }

    #[test]
    fn test_deep_nesting_converges() {
        let mut nested = "'x'".to_string();
        for _ in 0..40 {
            nested = format!("\"a {nested} b\"");
        }
        let resolved = ru().resolve(&nested);
        assert!(!resolved.contains('"'));
        assert!(!resolved.contains('\''));
    }
}
