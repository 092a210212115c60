//! Property-based tests for the transformation pipeline

use proptest::prelude::*;
use typus_core::{TransformOptions, Typus};

const SYMBOL_TOKENS: &[&str] = &[
    "(c)", "(r)", "(tm)", "(sm)", "1/2", "3/4", "...", "->", "<-", "+-", "==", "2-3",
    "111-00-00", "foo", "bar", "word", "Alpha", "©", "—", "½", "…", "«a»",
];

fn symbol_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SYMBOL_TOKENS), 1..8).prop_map(|t| t.join(" "))
}

/// Phrases without surrounding whitespace, markup or placeholder characters
fn phrase_strategy() -> impl Strategy<Value = String> {
    r#"[a-z(][a-z0-9()\-. "']{0,10}[a-z0-9)]"#
}

proptest! {
    #[test]
    fn escaped_phrase_survives_every_rule(
        prefix in "[a-zа-я]{1,8}",
        middle in "[a-z0-9]{1,8}",
        phrase in phrase_strategy(),
    ) {
        let typus = Typus::russian().unwrap();
        let text = format!("{prefix} {phrase} {middle} {phrase}");
        let options = TransformOptions::new().escape_phrase(phrase.clone());

        let result = typus.transform(&text, &options);

        // Separators next to short words may turn into no-break spaces
        let rest = result.strip_prefix(prefix.as_str());
        prop_assert!(rest.is_some(), "prefix changed in {result:?}");
        let mut rest = rest.unwrap_or_default().chars();
        prop_assert!(rest.next().is_some_and(char::is_whitespace));
        prop_assert!(
            rest.as_str().starts_with(phrase.as_str()),
            "{phrase:?} moved in {result:?}"
        );
        let head = result.strip_suffix(phrase.as_str());
        prop_assert!(head.is_some(), "{phrase:?} moved in {result:?}");
        prop_assert!(head
            .and_then(|head| head.chars().next_back())
            .is_some_and(char::is_whitespace));
    }

    #[test]
    fn symbol_family_is_idempotent(text in symbol_text()) {
        for typus in [Typus::russian().unwrap(), Typus::english().unwrap()] {
            let options = TransformOptions::new();
            let once = typus.transform(&text, &options);
            let twice = typus.transform(&once, &options);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn opaque_content_is_untouched(content in r#"[a-z0-9()\-. "']{0,20}"#) {
        let typus = Typus::english().unwrap();
        let text = format!("x <pre>{content}</pre> y");
        let result = typus.transform(&text, &TransformOptions::new());
        let expected = format!("<pre>{content}</pre>");
        prop_assert!(result.contains(&expected));
    }

    #[test]
    fn transform_never_panics(text in "\\PC{0,64}") {
        let typus = Typus::russian().unwrap();
        let _ = typus.transform(&text, &TransformOptions::new().debug(true));
    }
}
