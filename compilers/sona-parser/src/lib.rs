pub mod ast;
pub mod cache;
pub mod error;
pub mod parser;
pub mod split;
pub mod token;

mod chain;
mod context;
mod phrase;
mod predicate;
mod syntax;
mod validate;

pub use ast::{
    Chain, ChainLink, ComplexChain, ConditionalSentence, ContainsWord, HeadedPhrase, LaFragment, Mood, Predicate,
    PredicateKind, PrepositionalPhrase, Sentence, SimpleSentence, VerbPhrase, WordSet,
};
pub use cache::ParseCache;
pub use error::{ErrorKind, ParseError, ParseResult};
pub use parser::tokenize;
pub use sona_morph::{Lexeme, TaggedWord};

use sona_protocol::{Dialect, Lexicon};
use tracing::debug;

use crate::context::Context;

/// Turns one normalized sentence into a `Sentence` tree.
///
/// The lexicon is borrowed for the parser's lifetime: a `Vocabulary` built in memory,
/// or an `ArchivedDictionary` read zero-copy from a compiled lexicon.
pub struct Parser<'a> {
    lexicon: &'a dyn Lexicon,
    dialect: Dialect,
}

impl<'a> Parser<'a> {
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self {
            lexicon,
            dialect: Dialect::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parses `normalized`; `original` is only used in diagnostics.
    pub fn parse(&self, normalized: &str, original: &str) -> ParseResult<Sentence> {
        let mut cache = ParseCache::new();
        self.parse_with_cache(normalized, original, &mut cache)
    }

    /// Like `parse`, sharing resolved chains and phrases with earlier calls.
    pub fn parse_with_cache(&self, normalized: &str, original: &str, cache: &mut ParseCache) -> ParseResult<Sentence> {
        let mut ctx = Context {
            lexicon: self.lexicon,
            dialect: self.dialect,
            cache,
        };

        syntax::parse_sentence(&mut ctx, normalized, original).map_err(|err| {
            debug!(sentence = original, kind = ?err.kind(), %err, "parse failed");
            err
        })
    }

    /// `None` instead of an error, for callers that only want the successes.
    pub fn try_parse(&self, normalized: &str, original: &str) -> Option<Sentence> {
        self.parse(normalized, original).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rkyv::{check_archived_root, to_bytes};
    use sona_protocol::{
        Compound, Dictionary, Entry, Particle, Punctuation, Vocabulary, Word, WordClass,
    };

    fn parse(text: &str) -> ParseResult<Sentence> {
        let vocabulary = Vocabulary::builtin();
        Parser::new(&vocabulary).parse(text, text)
    }

    fn word(text: &str) -> Lexeme {
        Lexeme::Simple(Word::from(text))
    }

    #[test]
    fn test_simple_intransitive() {
        let sentence = parse("mi li moku.").unwrap();
        let simple = sentence.as_simple().unwrap();

        assert_eq!(simple.subject().unwrap().to_string(), "mi");
        assert_eq!(simple.predicates().len(), 1);

        let predicate = &simple.predicates()[0];
        assert_eq!(predicate.particle(), Particle::Li);
        assert_eq!(predicate.verb_phrase().unwrap().head(), Some(&word("moku")));
        assert!(predicate.verb_phrase().unwrap().modals().is_empty());
        assert!(predicate.direct_objects().is_none());
        assert!(predicate.prepositions().is_empty());
        assert_eq!(simple.punctuation(), Some(Punctuation::Period));
    }

    #[test]
    fn test_double_particle() {
        let err = parse("jan li li moku.").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Grammar);
        assert!(err.to_string().contains("li li"));
    }

    #[test]
    fn test_conditional() {
        let sentence = parse("sina wile la mi moku.").unwrap();
        let conditional = sentence.as_conditional().unwrap();

        assert_eq!(conditional.preconditions().len(), 1);
        let precondition = conditional.preconditions()[0].as_simple().unwrap();
        assert_eq!(precondition.subject().unwrap().to_string(), "sina");
        assert_eq!(precondition.predicates()[0].verb_phrase().unwrap().head(), Some(&word("wile")));
        assert_eq!(precondition.punctuation(), None);

        let conclusion = conditional.conclusion().as_simple().unwrap();
        assert_eq!(conclusion.subject().unwrap().to_string(), "mi");
        assert_eq!(conclusion.predicates()[0].verb_phrase().unwrap().head(), Some(&word("moku")));
        assert_eq!(conclusion.punctuation(), Some(Punctuation::Period));
    }

    #[test]
    fn test_imperative() {
        let sentence = parse("o moku!").unwrap();
        let simple = sentence.as_simple().unwrap();

        assert!(simple.subject().is_none());
        assert_eq!(simple.mood(), Mood::Imperative);
        assert_eq!(simple.predicates()[0].particle(), Particle::O);
        assert_eq!(simple.predicates()[0].verb_phrase().unwrap().head(), Some(&word("moku")));
        assert_eq!(simple.punctuation(), Some(Punctuation::Exclamation));
    }

    #[test]
    fn test_trailing_predicate_marker() {
        let err = parse("jan li").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(matches!(err, ParseError::TrailingPredicateMarker { .. }));
    }

    #[test]
    fn test_transitive_with_two_objects() {
        let sentence = parse("mi li jo e soweli e kili.").unwrap();
        let predicate = &sentence.as_simple().unwrap().predicates()[0];

        assert_eq!(predicate.verb_phrase().unwrap().head(), Some(&word("jo")));
        let objects = predicate.direct_objects().unwrap();
        assert_eq!(objects.particle(), Particle::E);

        let heads: Vec<String> = objects
            .links()
            .iter()
            .map(|link| match link {
                ChainLink::Simple(chain) => {
                    assert_eq!(chain.particle(), Particle::Pi);
                    chain.phrases()[0].head().to_string()
                }
                other => panic!("Expected a pi chain, got {:?}", other),
            })
            .collect();
        assert_eq!(heads, vec!["soweli", "kili"]);
    }

    #[test]
    fn test_try_parse() {
        let vocabulary = Vocabulary::builtin();
        let parser = Parser::new(&vocabulary);

        assert!(parser.try_parse("jan li moku.", "jan li moku.").is_some());
        assert!(parser.try_parse("jan li", "jan li").is_none());
    }

    #[test]
    fn test_strict_dialect_rejects_li_pi() {
        let vocabulary = Vocabulary::builtin();
        let lenient = Parser::new(&vocabulary);
        let strict = Parser::new(&vocabulary).with_dialect(Dialect::strict());

        assert!(lenient.parse("ona li pi jan pona.", "").is_ok());
        let err = strict.parse("ona li pi jan pona.", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_cache_is_shared_across_sentences() {
        let vocabulary = Vocabulary::builtin();
        let parser = Parser::new(&vocabulary);
        let mut cache = ParseCache::new();

        parser.parse_with_cache("jan pi ma suli li moku.", "", &mut cache).unwrap();
        assert!(!cache.is_empty());
        let hits = cache.hits();

        parser.parse_with_cache("jan pi ma suli li lape.", "", &mut cache).unwrap();
        assert!(cache.hits() > hits);
    }

    #[test]
    fn test_archived_lexicon() {
        // A tiny compiled lexicon: no `tomo tawa` compound, so the words stay apart
        let dict = Dictionary {
            version: 1,
            entries: vec![
                Entry { text: "li".into(), class: WordClass::PARTICLE.bits() },
                Entry { text: "e".into(), class: WordClass::PARTICLE.bits() },
                Entry { text: "tomo".into(), class: WordClass::CONTENT.bits() },
                Entry { text: "tawa".into(), class: (WordClass::CONTENT | WordClass::PREPOSITION).bits() },
            ],
            compounds: vec![Compound {
                head: "jan".into(),
                tail: vec!["lawa".into()],
            }],
        };

        let bytes = to_bytes::<_, 1024>(&dict).expect("Failed to serialize dictionary");
        let archived = check_archived_root::<Dictionary>(&bytes).expect("Corrupt archive");

        let parser = Parser::new(archived);
        let sentence = parser.parse("jan lawa li tomo tawa.", "").unwrap();
        let simple = sentence.as_simple().unwrap();

        let subject = &simple.subject().unwrap().words();
        assert_eq!(subject.len(), 2);
        assert!(matches!(
            simple.subject().unwrap().links()[0],
            ChainLink::Complex(ref pi) if matches!(pi.links()[0], ChainLink::Simple(ref chain) if matches!(chain.phrases()[0].head(), Lexeme::Tagged(_)))
        ));

        let verb = simple.predicates()[0].verb_phrase().unwrap();
        assert_eq!(verb.head(), Some(&word("tomo")));
        assert_eq!(verb.adverbs().len(), 1);
    }

    #[test]
    fn test_segments_and_words() {
        let sentence = parse("jan en soweli li moku e kili ~lon tomo.").unwrap();

        assert_eq!(sentence.segments().len(), 2);
        let words: Vec<&str> = sentence.words().into_iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["jan", "soweli", "moku", "kili", "lon", "tomo"]);
        assert!(sentence.contains(&Word::from("lon")));
        assert!(!sentence.contains(&Word::from("li")));
    }

    #[test]
    fn test_render_round_trip_examples() {
        for text in [
            "mi li moku.",
            "jan pi ma suli en soweli li moku e kili e telo ~kepeken ilo.",
            "o moku!",
            "tenpo pini la jan li kama la mi li pona.",
            "ona li lon ~tawa ma.",
            "sina li wile ala wile moku?",
            "jan Sonja o taso mi li moku.",
            "jan Mato o o moku!",
            "ona li pi jan pona e kili.",
        ] {
            let sentence = parse(text).unwrap();
            assert_eq!(sentence.to_string(), text);
            assert_eq!(parse(&sentence.to_string()).unwrap(), sentence);
        }
    }

    fn content_word() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["jan", "moku", "pona", "soweli", "kili", "suli", "tomo", "ma"])
    }

    proptest! {
        #[test]
        fn test_trailing_li_always_fails(
            words in prop::collection::vec(content_word(), 0..6),
            punctuation in prop::sample::select(vec!["", ".", "!", "?"]),
        ) {
            let text = format!("{} li{}", words.join(" "), punctuation);
            let text = text.trim_start();

            let err = parse(text).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Syntax);
        }

        #[test]
        fn test_double_particle_always_fails(
            before in prop::collection::vec(content_word(), 1..4),
            after in prop::collection::vec(content_word(), 1..4),
            particle in prop::sample::select(vec!["li", "e", "la", "pi"]),
        ) {
            let text = format!("{} {} {} {}.", before.join(" "), particle, particle, after.join(" "));

            let err = parse(&text).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Grammar);
        }

        #[test]
        fn test_parsed_sentences_survive_rendering(
            subject in prop::collection::vec(content_word(), 1..3),
            verb in prop::collection::vec(content_word(), 1..3),
            object in prop::option::of(prop::collection::vec(content_word(), 1..3)),
        ) {
            let mut text = format!("{} li {}", subject.join(" "), verb.join(" "));
            if let Some(object) = &object {
                text.push_str(" e ");
                text.push_str(&object.join(" "));
            }
            text.push('.');

            if let Ok(sentence) = parse(&text) {
                let rendered = sentence.to_string();
                prop_assert_eq!(parse(&rendered).unwrap(), sentence);
            }
        }
    }
}
