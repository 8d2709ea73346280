use sona_protocol::Particle;
use thiserror::Error;

/// Coarse classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Grammatically impossible particle placement.
    Syntax,
    /// A span too short (or empty) to satisfy a rule.
    Grammar,
    /// Input the parser should never have been handed.
    Argument,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("double particle: {particle} {particle} in '{fragment}'")]
    DoubleParticle { particle: Particle, fragment: String },

    #[error("illegal series of particles: {first} {second} in '{fragment}'")]
    IllegalParticleSequence {
        first: Particle,
        second: Particle,
        fragment: String,
    },

    #[error("sentence ends with li: '{fragment}'")]
    TrailingPredicateMarker { fragment: String },

    #[error("headed phrases have no particles, this one has {particle}: '{fragment}' (missing li between subject and verb?)")]
    ParticleInPhrase { particle: Particle, fragment: String },

    #[error("expected li or o to govern the predicate, found '{found}' in '{fragment}'")]
    MissingGoverningParticle { found: String, fragment: String },

    #[error("final pi in a pi chain must be followed by 2 words, otherwise use juxtaposition: '{fragment}'")]
    DanglingModifier { fragment: String },

    #[error("la left over in a simple sentence: '{fragment}'")]
    UnexpectedConditional { fragment: String },

    #[error("degenerate e phrase (e with nothing after it, missing 'e ni'?): '{fragment}'")]
    DegenerateObject { fragment: String },

    #[error("empty {what} in '{fragment}'")]
    EmptySpan { what: &'static str, fragment: String },

    #[error("no predicate in '{fragment}'")]
    MissingPredicate { fragment: String },

    #[error("unexpected punctuation '{symbol}' inside '{fragment}'")]
    UnexpectedPunctuation { symbol: char, fragment: String },

    #[error("sentence is headed by a fragment: '{fragment}'")]
    HeadlessSentence { fragment: String },

    #[error("conclusions need punctuation and preconditions must have none: '{fragment}'")]
    MisplacedPunctuation { fragment: String },

    #[error("cannot parse an empty sentence")]
    EmptyInput,

    #[error("malformed input ({reason}): '{fragment}'")]
    MalformedInput { reason: &'static str, fragment: String },

    #[error("{stage} was handed an empty span")]
    EmptyArgument { stage: &'static str },

    #[error("{particle} cannot occur in a {stage}: '{fragment}'")]
    ParticleInChain {
        particle: Particle,
        stage: &'static str,
        fragment: String,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::IllegalParticleSequence { .. }
            | ParseError::TrailingPredicateMarker { .. }
            | ParseError::ParticleInPhrase { .. }
            | ParseError::MissingGoverningParticle { .. }
            | ParseError::DanglingModifier { .. }
            | ParseError::UnexpectedConditional { .. } => ErrorKind::Syntax,

            ParseError::DoubleParticle { .. }
            | ParseError::DegenerateObject { .. }
            | ParseError::EmptySpan { .. }
            | ParseError::MissingPredicate { .. }
            | ParseError::UnexpectedPunctuation { .. }
            | ParseError::HeadlessSentence { .. }
            | ParseError::MisplacedPunctuation { .. } => ErrorKind::Grammar,

            ParseError::EmptyInput
            | ParseError::MalformedInput { .. }
            | ParseError::EmptyArgument { .. }
            | ParseError::ParticleInChain { .. } => ErrorKind::Argument,
        }
    }

    /// The offending text, when the error points at one.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            ParseError::DoubleParticle { fragment, .. }
            | ParseError::IllegalParticleSequence { fragment, .. }
            | ParseError::TrailingPredicateMarker { fragment }
            | ParseError::ParticleInPhrase { fragment, .. }
            | ParseError::MissingGoverningParticle { fragment, .. }
            | ParseError::DanglingModifier { fragment }
            | ParseError::UnexpectedConditional { fragment }
            | ParseError::DegenerateObject { fragment }
            | ParseError::EmptySpan { fragment, .. }
            | ParseError::MissingPredicate { fragment }
            | ParseError::UnexpectedPunctuation { fragment, .. }
            | ParseError::HeadlessSentence { fragment }
            | ParseError::MisplacedPunctuation { fragment }
            | ParseError::MalformedInput { fragment, .. }
            | ParseError::ParticleInChain { fragment, .. } => Some(fragment),
            ParseError::EmptyInput | ParseError::EmptyArgument { .. } => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
