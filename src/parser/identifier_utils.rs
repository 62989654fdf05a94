//! Token to text reconstruction for MySQL parsing.
//!
//! The syntax tree keeps the text a grammar rule covered, the way a generated
//! parser's "get text" does: tokens concatenated without the whitespace between
//! them. Identifiers keep their original quote character and string literals are
//! re-wrapped in theirs, so downstream normalization can strip them uniformly.
//!
//! ```ignore
//! // `db`.`tbl`  ->  "`db`.`tbl`"
//! // DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
//! //             ->  "CURRENT_TIMESTAMPONUPDATECURRENT_TIMESTAMP"
//! ```

use sqlparser::tokenizer::{Token, Word};

/// Converts a sqlparser-rs Word token to its quoted form.
///
/// - `Some('`')` -> `` `identifier` ``
/// - `Some('"')` -> `"identifier"`
/// - `None` -> `identifier` (unquoted, original case)
pub fn format_word(word: &Word) -> String {
    match word.quote_style {
        Some('`') => format!("`{}`", word.value.replace('`', "``")),
        Some('"') => format!("\"{}\"", word.value.replace('"', "\"\"")),
        Some('[') => format!("[{}]", word.value),
        _ => word.value.clone(),
    }
}

/// Converts a sqlparser-rs Token back to its source text.
///
/// The tokenizer runs without unescaping, so literal content is still the raw
/// text between the quotes (`it\'s`, `it''s`) and is re-wrapped as is.
pub fn format_token(token: &Token) -> String {
    match token {
        Token::Word(w) => format_word(w),
        Token::Number(n, _) => n.clone(),
        Token::SingleQuotedString(s) => format!("'{}'", s),
        Token::DoubleQuotedString(s) => format!("\"{}\"", s),
        Token::NationalStringLiteral(s) => format!("N'{}'", s),
        Token::EscapedStringLiteral(s) => format!("E'{}'", s),
        Token::HexStringLiteral(s) => format!("X'{}'", s),
        Token::SingleQuotedByteStringLiteral(s) => format!("b'{}'", s),
        Token::DoubleQuotedByteStringLiteral(s) => format!("b\"{}\"", s),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::Comma => ",".to_string(),
        Token::Period => ".".to_string(),
        Token::SemiColon => ";".to_string(),
        Token::Eq => "=".to_string(),
        Token::Plus => "+".to_string(),
        Token::Minus => "-".to_string(),
        Token::Mul => "*".to_string(),
        Token::Div => "/".to_string(),
        Token::Tilde => "~".to_string(),
        Token::ExclamationMark => "!".to_string(),
        Token::Whitespace(_) => String::new(),
        _ => token.to_string(),
    }
}

/// Returns the literal text of a string-literal token, or `None` for any other token.
pub fn string_literal_text(token: &Token) -> Option<String> {
    match token {
        Token::SingleQuotedString(_)
        | Token::DoubleQuotedString(_)
        | Token::NationalStringLiteral(_) => Some(format_token(token)),
        _ => None,
    }
}
