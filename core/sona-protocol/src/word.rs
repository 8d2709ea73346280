use alloc::string::String;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// An atomic lexical unit. The text is stored exactly as it appeared in the
/// normalized sentence; classification is always asked of a `Lexicon`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Word {
    text: String,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Proper modifiers (names, loan words) are written capitalised.
    pub fn is_proper(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// The closed class of grammatical markers the parser structures sentences around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Particle {
    /// Predicate marker.
    Li,
    /// Direct-object marker.
    E,
    /// Conditional marker (context / precondition separator).
    La,
    /// Modification marker (regroups modifiers).
    Pi,
    /// Coordination marker for subjects and other chains.
    En,
    /// Vocative and imperative marker.
    O,
    Anu,
    Taso,
    Ante,
    /// Emphasis.
    A,
    /// "also" / "indeed".
    Kin,
}

impl Particle {
    /// Particles that may never stand next to each other (modulo the dialect's `li pi`).
    pub const STRUCTURAL: [Particle; 4] = [Particle::Li, Particle::La, Particle::E, Particle::Pi];

    /// Tokens that may open a sentence as a conjunction.
    pub const CONJUNCTIONS: [Particle; 4] = [Particle::Taso, Particle::Anu, Particle::En, Particle::Ante];

    pub const fn word(self) -> &'static str {
        match self {
            Particle::Li => "li",
            Particle::E => "e",
            Particle::La => "la",
            Particle::Pi => "pi",
            Particle::En => "en",
            Particle::O => "o",
            Particle::Anu => "anu",
            Particle::Taso => "taso",
            Particle::Ante => "ante",
            Particle::A => "a",
            Particle::Kin => "kin",
        }
    }

    pub fn from_word(word: &str) -> Option<Particle> {
        let particle = match word {
            "li" => Particle::Li,
            "e" => Particle::E,
            "la" => Particle::La,
            "pi" => Particle::Pi,
            "en" => Particle::En,
            "o" => Particle::O,
            "anu" => Particle::Anu,
            "taso" => Particle::Taso,
            "ante" => Particle::Ante,
            "a" => Particle::A,
            "kin" => Particle::Kin,
            _ => return None,
        };
        Some(particle)
    }

    /// `li` and `o` are the only particles that may govern a predicate.
    pub const fn is_governing(self) -> bool {
        matches!(self, Particle::Li | Particle::O)
    }

    pub fn is_conjunction(self) -> bool {
        Self::CONJUNCTIONS.contains(&self)
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParticle(pub String);

impl fmt::Display for UnknownParticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a grammatical particle", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownParticle {}

impl FromStr for Particle {
    type Err = UnknownParticle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Particle::from_word(s).ok_or_else(|| UnknownParticle(String::from(s)))
    }
}

/// Terminal punctuation. The normalizer leaves at most one of these at the end of a sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Punctuation {
    Colon,
    #[default]
    Period,
    Question,
    Exclamation,
}

impl Punctuation {
    pub const SYMBOLS: [char; 4] = [':', '.', '?', '!'];

    pub const fn from_char(c: char) -> Option<Punctuation> {
        match c {
            ':' => Some(Punctuation::Colon),
            '.' => Some(Punctuation::Period),
            '?' => Some(Punctuation::Question),
            '!' => Some(Punctuation::Exclamation),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Punctuation::Colon => ':',
            Punctuation::Period => '.',
            Punctuation::Question => '?',
            Punctuation::Exclamation => '!',
        }
    }

    pub fn contains_punctuation(value: &str) -> bool {
        value.contains(Self::SYMBOLS)
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPunctuation(pub char);

impl fmt::Display for UnknownPunctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Punctuation must be : or . or ? or !, got '{}'", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownPunctuation {}

impl TryFrom<char> for Punctuation {
    type Error = UnknownPunctuation;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Punctuation::from_char(c).ok_or(UnknownPunctuation(c))
    }
}
