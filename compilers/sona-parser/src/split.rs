//! Token-run splitting. Two flavours are needed: one that keeps each separator at the
//! head of the piece it opens (`la`, `li`, `o`, `e`, prepositions) and one that throws
//! the separators away (`pi`, `en`).

use crate::token::Token;

/// Splits before every separator after the first token; separators stay with their piece.
pub fn split_before<'t, 'a>(
    tokens: &'t [Token<'a>],
    is_separator: impl Fn(&Token<'a>) -> bool,
) -> Vec<&'t [Token<'a>]> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate().skip(1) {
        if is_separator(token) {
            pieces.push(&tokens[start..i]);
            start = i;
        }
    }
    pieces.push(&tokens[start..]);
    pieces
}

/// Splits on every separator and drops it. Empty pieces are kept so callers can reject them.
pub fn split_dropping<'t, 'a>(
    tokens: &'t [Token<'a>],
    is_separator: impl Fn(&Token<'a>) -> bool,
) -> Vec<&'t [Token<'a>]> {
    tokens.split(|t| is_separator(t)).collect()
}
