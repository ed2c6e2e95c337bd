//! Moment-style format pattern translation.
//!
//! # Responsibility
//! - Translate the host's moment.js-style patterns (`YYYY-MM-DD`, `HH:mm`)
//!   into a structural regex fragment for line matching and a chrono strftime
//!   string for formatting/parsing.
//!
//! # Invariants
//! - Translation is total: unknown characters pass through as literals
//!   (regex-escaped on the matching side).
//! - Writer and reader must derive from the same pattern so that every
//!   written timestamp is structurally recognizable on re-parse.

/// Structural pattern for the default `HH:mm` timestamp, used as the fallback
/// when a configured pattern yields nothing matchable.
pub const DEFAULT_TIMESTAMP_REGEX: &str = r"\d{2}:\d{2}";

/// Supported moment-style tokens, longest first so the scanner can take the
/// greedy match at each position.
const TOKENS: &[(&str, &str, &str)] = &[
    // (moment token, regex fragment, chrono specifier)
    ("YYYY", r"\d{4}", "%Y"),
    ("YY", r"\d{2}", "%y"),
    ("MM", r"\d{2}", "%m"),
    ("DD", r"\d{2}", "%d"),
    ("HH", r"\d{2}", "%H"),
    ("hh", r"\d{2}", "%I"),
    ("mm", r"\d{2}", "%M"),
    ("ss", r"\d{2}", "%S"),
    ("M", r"\d{1,2}", "%-m"),
    ("D", r"\d{1,2}", "%-d"),
    ("H", r"\d{1,2}", "%-H"),
    ("h", r"\d{1,2}", "%-I"),
    ("m", r"\d{1,2}", "%-M"),
    ("s", r"\d{1,2}", "%-S"),
    ("A", r"(?:AM|PM)", "%p"),
    ("a", r"(?:am|pm)", "%P"),
];

/// Translates a moment-style pattern into a regex fragment matching the text
/// the same pattern would produce. Literal characters are escaped.
pub fn pattern_to_regex(pattern: &str) -> String {
    translate(pattern, |token| token.1, |literal| regex_escape_char(literal))
}

/// Translates a moment-style pattern into a chrono strftime string usable for
/// both formatting and reconstruction parsing.
pub fn pattern_to_chrono(pattern: &str) -> String {
    translate(
        pattern,
        |token| token.2,
        |literal| {
            if literal == '%' {
                "%%".to_string()
            } else {
                literal.to_string()
            }
        },
    )
}

fn translate(
    pattern: &str,
    token_out: impl Fn(&(&'static str, &'static str, &'static str)) -> &'static str,
    literal_out: impl Fn(char) -> String,
) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        for token in TOKENS {
            if let Some(tail) = rest.strip_prefix(token.0) {
                out.push_str(token_out(token));
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        // Unwrap-free: the loop guard guarantees at least one char.
        if let Some(ch) = chars.next() {
            out.push_str(&literal_out(ch));
        }
        rest = chars.as_str();
    }
    out
}

fn regex_escape_char(ch: char) -> String {
    match ch {
        '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' => {
            format!("\\{ch}")
        }
        _ => ch.to_string(),
    }
}
