use sona_parser::{ContainsWord, Sentence};
use sona_protocol::Word;
use thiserror::Error;
use tracing::debug;

/// The question word a fact may fill in.
pub const SEME: &str = "seme";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("nothing known answers '{question}'")]
    Unknown { question: String },
}

/// Same tree, punctuation aside: `mi li moku.` and `mi li moku!` are equivalent.
pub fn equivalent(a: &Sentence, b: &Sentence) -> bool {
    a.without_punctuation() == b.without_punctuation()
}

pub fn contains_word(sentence: &Sentence, word: &str) -> bool {
    sentence.contains(&Word::from(word))
}

/// Binds a question against a fact.
///
/// An equivalent fact answers itself. Otherwise every `seme` in the question may stand
/// for exactly one word of the fact, segment by segment; all other words must match.
pub fn bind_seme<'f>(fact: &'f Sentence, question: &Sentence) -> Option<&'f Sentence> {
    if equivalent(fact, question) {
        return Some(fact);
    }
    if !contains_word(question, SEME) {
        return None;
    }

    // 1. Same shape: as many subjects and predicates on both sides
    let facts = fact.segments();
    let questions = question.segments();
    if facts.len() != questions.len() {
        return None;
    }

    // 2. Word by word, seme matching anything
    let bound = facts.iter().zip(&questions).all(|(fact_segment, question_segment)| {
        let known = fact_segment.words();
        let asked = question_segment.words();
        known.len() == asked.len()
            && known
                .iter()
                .zip(&asked)
                .all(|(known, asked)| asked.as_str() == SEME || known == asked)
    });

    if bound {
        debug!(fact = %fact, question = %question, "seme bound");
        Some(fact)
    } else {
        None
    }
}

/// Sentences held to be true, asked in the order they were told.
#[derive(Debug, Default)]
pub struct Facts {
    sentences: Vec<Sentence>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tell(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The first fact that binds the question.
    pub fn ask(&self, question: &Sentence) -> Result<&Sentence, SolverError> {
        self.sentences
            .iter()
            .find_map(|fact| bind_seme(fact, question))
            .ok_or_else(|| SolverError::Unknown {
                question: question.to_string(),
            })
    }
}
