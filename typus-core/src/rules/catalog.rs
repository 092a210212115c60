//! Rule catalog
//!
//! Explicit mapping from rule group name to the factory that builds its
//! stages from a [`LocaleProfile`]. A locale lists group names in
//! `rules.order`; names are resolved here when the profile is built.

use super::{Rule, Stage};
use crate::chars::{ANYSP, DPRIME, MDASH, MDASH_PAIR, NBSP, NDASH, NNBSP, RSQUO, SPRIME, WHSP};
use crate::error::{Result, TypusError};
use crate::locale::LocaleProfile;
use crate::quotes::QuoteResolver;
use regex::Captures;

/// Builds the stages of one rule group
pub type RuleFactory = fn(&LocaleProfile) -> Result<Vec<Box<dyn Stage>>>;

const CATALOG: &[(&str, RuleFactory)] = &[
    ("quotes", quotes),
    ("spaces", spaces),
    ("linebreaks", linebreaks),
    ("apostrophe", apostrophe),
    ("complex_symbols", complex_symbols),
    ("mdash", mdash),
    ("primes", primes),
    ("phones", phones),
    ("digit_spaces", digit_spaces),
    ("pairs", pairs),
    ("units", units),
    ("ranges", ranges),
    ("vulgar_fractions", vulgar_fractions),
    ("math", math),
    ("ruble", ruble),
    ("abbrs", abbrs),
    ("rep_positional_spaces", rep_positional_spaces),
    ("del_positional_spaces", del_positional_spaces),
];

/// Factory registered under `name`
pub fn factory(name: &str) -> Option<RuleFactory> {
    CATALOG.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Whether the catalog provides `name`
pub fn is_known(name: &str) -> bool {
    factory(name).is_some()
}

/// Every group name, in catalog order
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

/// Check that every group in the profile's order has the tables it needs
pub fn check_requirements(profile: &LocaleProfile) -> Result<()> {
    profile
        .rule_order()
        .iter()
        .try_for_each(|name| required_table(name, profile))
}

fn required_table(name: &str, profile: &LocaleProfile) -> Result<()> {
    let missing = match name {
        "complex_symbols" if profile.complex_symbols().is_empty() => Some("complex symbol table"),
        "vulgar_fractions" if profile.fractions().is_empty() => Some("fraction table"),
        "math" if profile.math_signs().is_empty() => Some("math sign table"),
        "ruble" if profile.currency().map_or(true, |c| c.suffixes.is_empty()) => {
            Some("currency suffix list")
        }
        "rep_positional_spaces" if is_blank(profile.insert_spaces()) => Some("insert spacing table"),
        "del_positional_spaces" if is_blank(profile.delete_spaces()) => Some("delete spacing table"),
        _ => None,
    };

    match missing {
        Some(table) => Err(TypusError::MissingTable {
            rule: name.to_string(),
            table,
        }),
        None => Ok(()),
    }
}

fn is_blank(table: &crate::locale::SpacingTable) -> bool {
    table.left_of().is_empty() && table.right_of().is_empty()
}

fn boxed(rules: Vec<Rule>) -> Vec<Box<dyn Stage>> {
    rules
        .into_iter()
        .map(|rule| Box::new(rule) as Box<dyn Stage>)
        .collect()
}

/// Letter class wrapped so it can take a quantifier
fn letters(profile: &LocaleProfile) -> String {
    format!("(?:{})", profile.letters())
}

/// Character class of a literal symbol set, `None` when the set is empty
fn class_of(symbols: &str) -> Option<String> {
    (!symbols.is_empty()).then(|| format!("[{}]", regex::escape(symbols)))
}

/// Alternation of literal tokens, longest first
fn alternation<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

fn quotes(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let resolver: Box<dyn Stage> = Box::new(QuoteResolver::new(profile.quotes()));
    Ok(vec![resolver])
}

fn spaces(_: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    Ok(boxed(vec![
        Rule::builder("spaces:collapse", format!("{ANYSP}{{2,}}")).template(WHSP.to_string())?,
        Rule::builder("spaces:trim", format!("^{ANYSP}+|{ANYSP}+$")).template("")?,
    ]))
}

fn linebreaks(_: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    Ok(boxed(vec![
        Rule::builder("linebreaks:unix", r"\r\n").template("\n")?,
        Rule::builder("linebreaks:collapse", r"\n{3,}").template("\n\n")?,
    ]))
}

fn apostrophe(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let w = letters(profile);
    Ok(boxed(vec![Rule::builder("apostrophe", "'")
        .preceded_by(format!("{w}|[0-9]"))
        .followed_by(w)
        .template(RSQUO.to_string())?]))
}

fn complex_symbols(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    required_table("complex_symbols", profile)?;
    let table = profile.complex_symbols();
    let pattern = format!("({})", alternation(table.tokens()));
    Ok(boxed(vec![
        Rule::builder("complex_symbols", pattern).lookup(table.clone())?
    ]))
}

fn mdash(_: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let dash = format!(r"[\-{NDASH}]");
    Ok(boxed(vec![
        // Double hyphen is always a dash
        Rule::builder("mdash:double", format!("{WHSP}--{WHSP}")).template(MDASH_PAIR)?,
        // Between anything but a lone number on the right
        Rule::builder("mdash:spaced", format!("{ANYSP}+{dash}{ANYSP}+"))
            .not_followed_by(r"\d\b")
            .template(MDASH_PAIR)?,
        // Non-digits on the left settle it even before a number
        Rule::builder("mdash:after_words", format!(r"(\b\D+){ANYSP}+{dash}{ANYSP}+"))
            .template(format!("${{1}}{MDASH_PAIR}"))?,
        Rule::builder("mdash:line_start", format!(r"^\-{{1,2}}{ANYSP}+"))
            .template(format!("{MDASH}{NBSP}"))?,
        // Verse lines may end with a dash
        Rule::builder("mdash:line_end", format!(r"{ANYSP}+\-{{1,2}}{ANYSP}*"))
            .followed_by("$|<br/?>")
            .template(format!("{NBSP}{MDASH}"))?,
    ]))
}

fn primes(_: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    Ok(boxed(vec![
        Rule::builder("primes:single", format!(r"(^|{ANYSP})(\d+)'"))
            .template(format!("${{1}}${{2}}{SPRIME}"))?,
        Rule::builder("primes:double", format!(r#"(^|{ANYSP})(\d+)""#))
            .template(format!("${{1}}${{2}}{DPRIME}"))?,
    ]))
}

fn phones(_: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    Ok(boxed(vec![Rule::builder(
        "phones",
        r"([0-9]{2,4})\-([0-9]{2,4})\-([0-9]{2,4})",
    )
    .template(format!("${{1}}{NDASH}${{2}}{NDASH}${{3}}"))?]))
}

/// Ahead context for numbers: another numeral, a word or a math operator
fn number_context(profile: &LocaleProfile) -> String {
    let mut context = format!(r"[0-9]+\b|{}", letters(profile));
    if let Some(ops) = class_of(profile.math_operators()) {
        context.push('|');
        context.push_str(&ops);
    }
    context
}

fn digit_spaces(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    Ok(boxed(vec![Rule::builder("digit_spaces", format!(r"\b(\d{{1,3}}){WHSP}"))
        .followed_by(number_context(profile))
        // A long tail with decimals is not a thousands group
        .not_followed_by(r"[0-9]{4,},")
        .template(format!("${{1}}{NBSP}"))?]))
}

fn pairs(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let w = letters(profile);
    Ok(boxed(vec![
        Rule::builder("pairs:glue", format!(r"\b({w}{{1,2}}){WHSP}+"))
            .template(format!("${{1}}{NBSP}"))?,
        // Undo after a hyphen, ellipsis or apostrophe
        Rule::builder("pairs:unglue", format!(r"([\-…{RSQUO}]{w}{{1,2}}){NBSP}"))
            .template(format!("${{1}}{WHSP}"))?,
    ]))
}

fn units(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let w = letters(profile);
    Ok(boxed(vec![Rule::builder("units", format!(r"\b(\d+){WHSP}*({w}{{1,3}})\b"))
        .template_unless(
            format!("${{1}}{NBSP}${{2}}"),
            2,
            profile.unit_exceptions(),
        )?]))
}

fn parse_number(s: &str) -> Option<f64> {
    s.replace(',', ".").parse().ok()
}

/// Em dash only when the range ascends, otherwise the hyphen stays
fn range_dash(caps: &Captures<'_>) -> String {
    let left = caps.get(1).map_or("", |m| m.as_str());
    let dash = caps.get(2).map_or("", |m| m.as_str());
    let right = caps.get(3).map_or("", |m| m.as_str());

    match (parse_number(left), parse_number(right)) {
        (Some(l), Some(r)) if l < r => format!("{left}{MDASH}{right}"),
        _ => format!("{left}{dash}{right}"),
    }
}

fn ranges(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let mut suppress = letters(profile);
    if let Some(ops) = class_of(profile.math_operators()) {
        suppress = format!("{ANYSP}*{ops}|{suppress}");
    }

    Ok(boxed(vec![Rule::builder(
        "ranges",
        r"(-?(?:[0-9]+[.,][0-9]+|[0-9]+))(-)([0-9]+[.,][0-9]+|[0-9]+)",
    )
    .not_followed_by(suppress)
    .computed(range_dash)?]))
}

fn vulgar_fractions(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    required_table("vulgar_fractions", profile)?;
    let table = profile.fractions();
    // Word boundaries keep 11/22 intact
    let pattern = format!(r"\b({})\b", alternation(table.tokens()));
    Ok(boxed(vec![
        Rule::builder("vulgar_fractions", pattern).lookup(table.clone())?
    ]))
}

fn math(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    required_table("math", profile)?;
    profile
        .math_signs()
        .iter()
        .map(|(operators, sign)| {
            let class = format!("[{}]", regex::escape(operators));
            Rule::builder(
                format!("math:{sign}"),
                format!(r"(^|{ANYSP}|\d){class}({ANYSP}*\d)"),
            )
            .template(format!("${{1}}{sign}${{2}}"))
            .map(|rule| Box::new(rule) as Box<dyn Stage>)
        })
        .collect()
}

fn ruble(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    required_table("ruble", profile)?;
    let Some(currency) = profile.currency() else {
        return Ok(Vec::new());
    };

    let mut suffixes: Vec<&str> = currency.suffixes.iter().map(String::as_str).collect();
    suffixes.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let separator = if currency.spaced { NBSP.to_string() } else { String::new() };

    Ok(boxed(vec![Rule::builder(
        "ruble",
        format!(r"(\d){ANYSP}*(?:{})\b\.?", alternation(suffixes)),
    )
    .template(format!("${{1}}{separator}{}", currency.glyph))?]))
}

fn abbrs(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    let w = letters(profile);
    Ok(boxed(vec![
        // Initials
        Rule::builder("abbrs:initials", format!(r"\b({w}\.){ANYSP}*({w}\.)"))
            .template(format!("${{1}}{NNBSP}${{2}}"))?,
        Rule::builder("abbrs:word", format!(r"\b({w}\.){WHSP}*"))
            .followed_by(w)
            .template(format!("${{1}}{NBSP}"))?,
    ]))
}

/// Spaces next to a symbol set, anchored on the symbol without consuming it
fn positional(
    name: &str,
    table: &crate::locale::SpacingTable,
    find: &str,
    replace: &str,
) -> Result<Vec<Box<dyn Stage>>> {
    let mut rules = Vec::new();

    if let Some(class) = class_of(&table.left_of()) {
        rules.push(
            Rule::builder(format!("{name}:before"), format!("{find}+"))
                .followed_by(class)
                .template(replace)?,
        );
    }

    if let Some(class) = class_of(&table.right_of()) {
        rules.push(
            Rule::builder(format!("{name}:after"), format!("{find}+"))
                .preceded_by(class)
                .template(replace)?,
        );
    }

    Ok(boxed(rules))
}

fn rep_positional_spaces(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    required_table("rep_positional_spaces", profile)?;
    positional(
        "rep_positional_spaces",
        profile.insert_spaces(),
        &WHSP.to_string(),
        &NBSP.to_string(),
    )
}

fn del_positional_spaces(profile: &LocaleProfile) -> Result<Vec<Box<dyn Stage>>> {
    required_table("del_positional_spaces", profile)?;
    positional("del_positional_spaces", profile.delete_spaces(), ANYSP, "")
}
