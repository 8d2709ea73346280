#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use sona_protocol::{Lexicon, Word};

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompoundError {
    EmptyTail(String),
    ParticleHead(String),
    NotLicensed { head: String, tail: Vec<String> },
}

impl fmt::Display for CompoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundError::EmptyTail(head) => write!(f, "'{}' has no tail to compound with", head),
            CompoundError::ParticleHead(head) => write!(f, "particle '{}' cannot head a compound", head),
            CompoundError::NotLicensed { head, tail } => {
                write!(f, "'{} {}' is not a licensed compound", head, tail.join(" "))
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CompoundError {}

/// A head word that has absorbed a validated multi-word tail (`tomo tawa kon`, `jan Mato`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TaggedWord {
    head: Word,
    tail: Vec<Word>,
}

impl TaggedWord {
    /// Builds the compound only if the lexicon licenses `head tail...` as one unit.
    pub fn new<L: Lexicon + ?Sized>(
        head: &Word,
        tail: &[Word],
        lexicon: &L,
    ) -> Result<TaggedWord, CompoundError> {
        if tail.is_empty() {
            return Err(CompoundError::EmptyTail(head.as_str().into()));
        }
        if lexicon.is_particle(head.as_str()) {
            return Err(CompoundError::ParticleHead(head.as_str().into()));
        }

        let tail_text: Vec<&str> = tail.iter().map(Word::as_str).collect();
        if !lexicon.validate_compound(head.as_str(), &tail_text) {
            return Err(CompoundError::NotLicensed {
                head: head.as_str().into(),
                tail: tail_text.iter().map(|w| String::from(*w)).collect(),
            });
        }

        Ok(TaggedWord {
            head: head.clone(),
            tail: tail.to_vec(),
        })
    }

    pub fn head(&self) -> &Word {
        &self.head
    }

    pub fn tail(&self) -> &[Word] {
        &self.tail
    }
}

impl fmt::Display for TaggedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for word in &self.tail {
            write!(f, " {}", word)?;
        }
        Ok(())
    }
}

/// A word slot after compounding: either a lone word or a merged compound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Lexeme {
    Simple(Word),
    Tagged(TaggedWord),
}

impl Lexeme {
    pub fn head(&self) -> &Word {
        match self {
            Lexeme::Simple(word) => word,
            Lexeme::Tagged(tagged) => tagged.head(),
        }
    }

    /// The lone word, if this slot was not merged.
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Lexeme::Simple(word) => Some(word),
            Lexeme::Tagged(_) => None,
        }
    }

    /// Every surface word in order.
    pub fn words(&self) -> Vec<&Word> {
        match self {
            Lexeme::Simple(word) => vec![word],
            Lexeme::Tagged(tagged) => core::iter::once(tagged.head()).chain(tagged.tail()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Lexeme::Simple(_) => 1,
            Lexeme::Tagged(tagged) => 1 + tagged.tail().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Simple(word) => write!(f, "{}", word),
            Lexeme::Tagged(tagged) => write!(f, "{}", tagged),
        }
    }
}

impl From<Word> for Lexeme {
    fn from(word: Word) -> Self {
        Lexeme::Simple(word)
    }
}

/// Merges adjacent words into compounds, longest match first.
///
/// At each position the longest tail the lexicon accepts wins; scanning resumes right
/// after the consumed span. A word with no valid tail stands alone.
pub fn compound<L: Lexicon + ?Sized>(words: &[Word], lexicon: &L) -> Vec<Lexeme> {
    let mut merged = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let head = &words[i];

        // Try successively shorter tails: words[i+1..=end] for end = last .. i+1
        let longest = (i + 1..words.len())
            .rev()
            .find_map(|end| TaggedWord::new(head, &words[i + 1..=end], lexicon).ok().map(|t| (end, t)));

        match longest {
            Some((end, tagged)) => {
                merged.push(Lexeme::Tagged(tagged));
                i = end + 1;
            }
            None => {
                merged.push(Lexeme::Simple(head.clone()));
                i += 1;
            }
        }
    }

    merged
}
