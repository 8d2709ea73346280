use sona_protocol::Particle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Any word, particles included
    Word,
    /// A word carrying the `~` preposition marker
    Preposition,
    /// Sentence punctuation or a comma
    Punctuation(char),
    /// Quotation marks « »
    Quote(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn word(span: Span, text: &'a str) -> Self {
        let kind = if text.len() > 1 && text.starts_with('~') {
            TokenKind::Preposition
        } else {
            TokenKind::Word
        };
        Self { span, text, kind }
    }

    pub fn is(&self, particle: Particle) -> bool {
        self.kind == TokenKind::Word && self.text == particle.word()
    }

    pub fn particle(&self) -> Option<Particle> {
        match self.kind {
            TokenKind::Word => Particle::from_word(self.text),
            _ => None,
        }
    }

    pub fn is_preposition(&self) -> bool {
        self.kind == TokenKind::Preposition
    }

    /// The text with any preposition marker removed.
    pub fn bare(&self) -> &'a str {
        match self.kind {
            TokenKind::Preposition => &self.text[1..],
            _ => self.text,
        }
    }
}

/// Rebuilds the space-separated text of a token run, for cache keys and diagnostics.
pub fn fragment(tokens: &[Token<'_>]) -> String {
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(token.text);
    }
    text
}

pub fn contains(tokens: &[Token<'_>], particle: Particle) -> bool {
    tokens.iter().any(|t| t.is(particle))
}

/// Drops one leading `particle`, if present.
pub fn strip_leading<'t, 'a>(tokens: &'t [Token<'a>], particle: Particle) -> &'t [Token<'a>] {
    match tokens.split_first() {
        Some((first, rest)) if first.is(particle) => rest,
        _ => tokens,
    }
}
