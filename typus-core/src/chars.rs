//! Character table
//!
//! Every glyph the engine emits or recognizes lives here so rule patterns
//! and tests refer to names instead of invisible codepoints.

/// Regular space
pub const WHSP: char = ' ';
/// No-break space
pub const NBSP: char = '\u{00A0}';
/// Narrow no-break space, used between initials
pub const NNBSP: char = '\u{202F}';
/// Thin space
pub const THNSP: char = '\u{2009}';

/// Em dash
pub const MDASH: char = '\u{2014}';
/// En dash
pub const NDASH: char = '\u{2013}';
/// Minus sign
pub const MINUS: char = '\u{2212}';
/// Multiplication sign
pub const TIMES: char = '\u{00D7}';

/// Prime (feet, minutes)
pub const SPRIME: char = '\u{2032}';
/// Double prime (inches, seconds)
pub const DPRIME: char = '\u{2033}';

/// Left single quotation mark
pub const LSQUO: char = '\u{2018}';
/// Right single quotation mark, also the typographic apostrophe
pub const RSQUO: char = '\u{2019}';
/// Left double quotation mark
pub const LDQUO: char = '\u{201C}';
/// Right double quotation mark
pub const RDQUO: char = '\u{201D}';
/// Double low-9 quotation mark
pub const DLQUO: char = '\u{201E}';
/// Left-pointing double angle quotation mark
pub const LAQUO: char = '\u{00AB}';
/// Right-pointing double angle quotation mark
pub const RAQUO: char = '\u{00BB}';

/// Russian ruble sign
pub const RUBLE: char = '\u{20BD}';

/// Straight quote every recognized quote glyph is normalized to
pub const QUOTE_MARKER: char = '\'';

/// Straight double quote, the second marker kind the resolver pairs
pub const DOUBLE_MARKER: char = '"';

/// Quote glyphs of both supported locales
pub const QUOTE_GLYPHS: [char; 7] = [LSQUO, RSQUO, LDQUO, RDQUO, DLQUO, LAQUO, RAQUO];

/// Marker rendered in place of [`NBSP`] and [`NNBSP`] in debug mode
pub const DEBUG_SPACE: char = '_';

/// Regex class matching any space the engine treats as a separator
pub const ANYSP: &str = "[ \u{00A0}\u{202F}\u{2009}]";

/// Em dash glued to the left token, regular space to the right
pub const MDASH_PAIR: &str = "\u{00A0}\u{2014} ";
