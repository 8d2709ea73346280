use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{multispace0, one_of},
    combinator::map,
    IResult,
};
use crate::token::{Span, Token, TokenKind};

const PUNCTUATION: &str = ",;:.?!";
const QUOTES: &str = "«»";

/// Anything that is not whitespace, punctuation or a quote mark belongs to a word.
/// Prepositions (`~tawa`), numerals (`#ATLW`) and loan words pass through untouched.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !PUNCTUATION.contains(c) && !QUOTES.contains(c)
}

#[derive(Debug, Clone)]
pub enum RawToken<'a> {
    Word(&'a str),
    Punct(char),
    Quote(char),
}

pub fn parse_with_spans(original_input: &str) -> Vec<(Span, RawToken)> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Try to match a token
        let parse_res: IResult<&str, RawToken> = alt((
            map(take_while1(is_word_char), RawToken::Word),
            map(one_of(PUNCTUATION), RawToken::Punct),
            map(one_of(QUOTES), RawToken::Quote),
        ))(input);

        match parse_res {
            Ok((next_input, token)) => {
                let len = input.len() - next_input.len();
                let start = input.as_ptr() as usize - original_input.as_ptr() as usize;

                result.push((Span::new(start, start + len), token));
                input = next_input;
            }
            Err(_) => {
                // Skip one char to recover
                if let Some(c) = input.chars().next() {
                    input = &input[c.len_utf8()..];
                } else {
                    break;
                }
            }
        }
    }

    result
}

/// Text -> tokens, spans pointing back into `input`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    parse_with_spans(input)
        .into_iter()
        .map(|(span, raw)| match raw {
            RawToken::Word(text) => Token::word(span, text),
            RawToken::Punct(c) => Token {
                span,
                text: &input[span.start..span.end],
                kind: TokenKind::Punctuation(c),
            },
            RawToken::Quote(c) => Token {
                span,
                text: &input[span.start..span.end],
                kind: TokenKind::Quote(c),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokens = tokenize("mi li moku, a!");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["mi", "li", "moku", ",", "a", "!"]);

        assert_eq!(tokens[2].span, Span::new(6, 10));
        assert_eq!(tokens[3].kind, TokenKind::Punctuation(','));
        assert_eq!(tokens[5].kind, TokenKind::Punctuation('!'));
    }

    #[test]
    fn test_prepositions_and_numerals_are_words() {
        let tokens = tokenize("ona li lon ~tawa ma #ATLW");

        assert_eq!(tokens[3].kind, TokenKind::Preposition);
        assert_eq!(tokens[3].bare(), "tawa");
        assert_eq!(tokens[5].text, "#ATLW");
        assert_eq!(tokens[5].kind, TokenKind::Word);
    }

    #[test]
    fn test_quotes_are_separate_tokens() {
        let tokens = tokenize("«toki»");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Quote('«'), TokenKind::Word, TokenKind::Quote('»')]
        );
        // Multi-byte quote marks keep byte offsets consistent
        assert_eq!(&"«toki»"[tokens[1].span.start..tokens[1].span.end], "toki");
    }

    #[test]
    fn test_bare_tilde_is_a_word() {
        let tokens = tokenize("~");
        assert_eq!(tokens[0].kind, TokenKind::Word);
    }
}
