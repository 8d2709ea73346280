use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use crate::class::WordClass;
use crate::model::{ArchivedDictionary, Dictionary};

/// The dictionary collaborator the parser consults. Everything the grammar engine
/// needs to know about a word goes through this trait.
pub trait Lexicon {
    /// Classification of a single word. Unknown words classify as empty.
    fn classify(&self, word: &str) -> WordClass;

    /// Whether `head` followed by `tail` forms a single licensed compound.
    fn validate_compound(&self, head: &str, tail: &[&str]) -> bool;

    fn is_particle(&self, word: &str) -> bool {
        self.classify(word).contains(WordClass::PARTICLE)
    }

    fn is_modal(&self, word: &str) -> bool {
        self.classify(word).contains(WordClass::MODAL)
    }

    fn is_interjection(&self, word: &str) -> bool {
        self.classify(word).contains(WordClass::INTERJECTION)
    }

    /// Poman numerals: `#` followed by letters or digits, e.g. `#ATLW`.
    fn is_numeral_literal(&self, word: &str) -> bool {
        is_poman_numeral(word)
    }
}

pub fn is_poman_numeral(word: &str) -> bool {
    match word.strip_prefix('#') {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

fn is_proper(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Classification for words the dictionary does not list.
fn classify_unlisted(word: &str) -> WordClass {
    if is_poman_numeral(word) {
        WordClass::NUMERAL
    } else if is_proper(word) {
        WordClass::PROPER | WordClass::CONTENT
    } else {
        WordClass::empty()
    }
}

/// A head followed only by proper modifiers is a name (`jan Mato`, `ma Kanata`).
fn is_proper_name(tail: &[&str]) -> bool {
    !tail.is_empty() && tail.iter().all(|w| is_proper(w))
}

/// In-memory index over a `Dictionary`: O(log n) lookups instead of linear scans.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: BTreeMap<String, WordClass>,
    compounds: BTreeSet<Vec<String>>,
}

impl Vocabulary {
    pub fn builtin() -> Self {
        Self::from(&Dictionary::builtin())
    }

    pub fn insert(&mut self, word: impl Into<String>, class: WordClass) {
        *self.words.entry(word.into()).or_insert_with(WordClass::empty) |= class;
    }

    pub fn insert_compound<S: AsRef<str>>(&mut self, words: &[S]) {
        self.compounds
            .insert(words.iter().map(|w| String::from(w.as_ref())).collect());
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<&Dictionary> for Vocabulary {
    fn from(dict: &Dictionary) -> Self {
        let mut vocabulary = Vocabulary::default();
        for entry in &dict.entries {
            vocabulary.insert(entry.text.clone(), entry.class());
        }
        for compound in &dict.compounds {
            let mut words = Vec::with_capacity(compound.tail.len() + 1);
            words.push(compound.head.clone());
            words.extend(compound.tail.iter().cloned());
            vocabulary.compounds.insert(words);
        }
        vocabulary
    }
}

impl Lexicon for Vocabulary {
    fn classify(&self, word: &str) -> WordClass {
        self.words
            .get(word)
            .copied()
            .unwrap_or_else(|| classify_unlisted(word))
    }

    fn validate_compound(&self, head: &str, tail: &[&str]) -> bool {
        if tail.is_empty() || self.is_particle(head) {
            return false;
        }
        if is_proper_name(tail) {
            return true;
        }
        let mut key = Vec::with_capacity(tail.len() + 1);
        key.push(String::from(head));
        key.extend(tail.iter().map(|w| String::from(*w)));
        self.compounds.contains(&key)
    }
}

/// Lookups straight against an archived (rkyv) dictionary.
/// Linear scan, suited to small lexicons loaded zero-copy.
impl Lexicon for ArchivedDictionary {
    fn classify(&self, word: &str) -> WordClass {
        self.entries
            .iter()
            .find(|entry| entry.text.as_str() == word)
            .map(|entry| entry.class())
            .unwrap_or_else(|| classify_unlisted(word))
    }

    fn validate_compound(&self, head: &str, tail: &[&str]) -> bool {
        if tail.is_empty() || self.is_particle(head) {
            return false;
        }
        if is_proper_name(tail) {
            return true;
        }
        self.compounds.iter().any(|compound| {
            compound.head.as_str() == head
                && compound.tail.len() == tail.len()
                && compound
                    .tail
                    .iter()
                    .zip(tail)
                    .all(|(archived, word)| archived.as_str() == *word)
        })
    }
}
