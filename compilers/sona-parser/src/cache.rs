use std::collections::HashMap;

use crate::ast::{Chain, HeadedPhrase};

/// Memo of resolved pi chains and headed phrases, keyed by their normalized text.
///
/// Owned by whoever calls the parser: hand the same cache to several `parse_with_cache`
/// calls to share work across sentences, or let `parse` create a fresh one each time.
/// An entry is written once and never replaced.
#[derive(Debug, Default)]
pub struct ParseCache {
    chains: HashMap<String, Chain>,
    phrases: HashMap<String, HeadedPhrase>,
    hits: usize,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chains.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.phrases.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub(crate) fn chain(&mut self, key: &str) -> Option<Chain> {
        let found = self.chains.get(key).cloned();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    pub(crate) fn remember_chain(&mut self, key: String, chain: &Chain) {
        self.chains.entry(key).or_insert_with(|| chain.clone());
    }

    pub(crate) fn phrase(&mut self, key: &str) -> Option<HeadedPhrase> {
        let found = self.phrases.get(key).cloned();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    pub(crate) fn remember_phrase(&mut self, key: String, phrase: &HeadedPhrase) {
        self.phrases.entry(key).or_insert_with(|| phrase.clone());
    }
}
