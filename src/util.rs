//! Shared text normalization helpers.
//!
//! Every component that turns token text into model values goes through these:
//! identifiers, comments, default values and length clauses all arrive with
//! quoting or bracketing that the schema model does not keep.

/// Characters stripped by [`trim_quote`].
const QUOTE_CHARS: [char; 3] = ['\'', '"', '`'];

/// Characters stripped by [`trim_bracket`].
const BRACKET_CHARS: [char; 6] = ['(', ')', '[', ']', '{', '}'];

/// Control characters removed from identifiers, comments and default values.
pub const CONTROL_CHARS: [(&str, &str); 3] = [("\r", ""), ("\n", ""), ("\t", "")];

/// Strip any `'`, `"` or `` ` `` from both ends of `s`.
///
/// This is a single outer trim, so `` `db`.`tbl` `` becomes `` db`.`tbl ``.
#[inline]
pub fn trim_quote(s: &str) -> String {
    s.trim_matches(|c| QUOTE_CHARS.contains(&c)).to_string()
}

/// Apply literal `(old, new)` substring replacements in order.
pub fn replace_all(s: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = s.to_string();
    for (old, new) in pairs {
        if !old.is_empty() && out.contains(old) {
            out = out.replace(old, new);
        }
    }
    out
}

/// Strip any bracket character from both ends of `s`: `"(255)"` becomes `"255"`.
#[inline]
pub fn trim_bracket(s: &str) -> String {
    s.trim_matches(|c| BRACKET_CHARS.contains(&c)).to_string()
}

/// Quote-strip an identifier and drop tab, carriage return and newline characters.
pub fn normalize_identifier(s: &str) -> String {
    replace_all(&trim_quote(s), &CONTROL_CHARS)
}
