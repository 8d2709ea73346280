use sona_morph::{compound, Lexeme};
use sona_protocol::{Particle, Word};
use tracing::trace;

use crate::ast::{HeadedPhrase, PrepositionalPhrase, WordSet};
use crate::chain::resolve_coordination;
use crate::context::Context;
use crate::error::{ParseError, ParseResult};
use crate::split::split_before;
use crate::token::{contains, fragment, Token};

/// Compounds a run of plain words against the lexicon.
pub(crate) fn lexemes(ctx: &Context<'_>, tokens: &[Token<'_>]) -> Vec<Lexeme> {
    let words: Vec<Word> = tokens.iter().map(|t| Word::new(t.text)).collect();
    compound(&words, ctx.lexicon)
}

/// `jan pona ~lon tomo` -> head `jan`, modifier `pona`, one prepositional phrase.
pub(crate) fn headed_phrase(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<HeadedPhrase> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyArgument { stage: "headed phrase" });
    }

    let key = fragment(tokens);
    if let Some(phrase) = ctx.cache.phrase(&key) {
        return Ok(phrase);
    }

    for particle in [Particle::Pi, Particle::La, Particle::E, Particle::Li, Particle::En, Particle::O] {
        if contains(tokens, particle) {
            return Err(ParseError::ParticleInPhrase { particle, fragment: key });
        }
    }

    let pieces = split_before(tokens, Token::is_preposition);
    let head_part = pieces[0];
    if head_part[0].is_preposition() {
        return Err(ParseError::EmptySpan {
            what: "phrase head",
            fragment: key,
        });
    }
    let prepositions = prepositional_phrases(ctx, &pieces[1..])?;

    let mut words = lexemes(ctx, head_part).into_iter();
    let Some(head) = words.next() else {
        return Err(ParseError::EmptyArgument { stage: "headed phrase" });
    };
    let phrase = HeadedPhrase::new(head, words.collect(), prepositions);

    ctx.cache.remember_phrase(key, &phrase);
    Ok(phrase)
}

/// Each piece starts with a `~preposition`; whatever follows is its complement.
pub(crate) fn prepositional_phrases(
    ctx: &mut Context<'_>,
    pieces: &[&[Token<'_>]],
) -> ParseResult<Vec<PrepositionalPhrase>> {
    let mut phrases = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let Some((preposition, complement)) = piece.split_first() else {
            continue;
        };
        if !preposition.is_preposition() {
            trace!(fragment = %fragment(piece), "not a prepositional phrase, skipped");
            continue;
        }

        let complement = match complement {
            [] => None,
            tail => Some(resolve_coordination(ctx, tail)?),
        };
        phrases.push(PrepositionalPhrase::new(Word::new(preposition.bare()), complement));
    }
    Ok(phrases)
}

/// `a!`, `pona a!`, `mu kin`: one interjection trailed only by `a` or `kin`.
pub(crate) fn exclamation(ctx: &Context<'_>, tokens: &[Token<'_>]) -> Option<HeadedPhrase> {
    let (head, rest) = tokens.split_first()?;
    if !ctx.lexicon.is_interjection(head.text) {
        return None;
    }
    if !rest.iter().all(|t| t.is(Particle::A) || t.is(Particle::Kin)) {
        return None;
    }

    let modifiers: WordSet = rest.iter().map(|t| Lexeme::Simple(Word::new(t.text))).collect();
    Some(HeadedPhrase::new(Lexeme::Simple(Word::new(head.text)), modifiers, Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ContainsWord;
    use crate::cache::ParseCache;
    use crate::parser::tokenize;
    use sona_protocol::{Dialect, Vocabulary};

    fn with_context<T>(run: impl FnOnce(&mut Context<'_>) -> T) -> T {
        let vocabulary = Vocabulary::builtin();
        let mut cache = ParseCache::new();
        let mut ctx = Context {
            lexicon: &vocabulary,
            dialect: Dialect::default(),
            cache: &mut cache,
        };
        run(&mut ctx)
    }

    #[test]
    fn test_head_modifiers_and_prepositions() {
        let phrase = with_context(|ctx| headed_phrase(ctx, &tokenize("jan pona ~lon tomo suli"))).unwrap();

        assert_eq!(phrase.head(), &Lexeme::Simple(Word::from("jan")));
        assert_eq!(phrase.modifiers().len(), 1);
        assert_eq!(phrase.prepositions().len(), 1);
        assert_eq!(phrase.prepositions()[0].preposition(), &Word::from("lon"));
        assert_eq!(phrase.to_string(), "jan pona ~lon tomo suli");
        assert!(phrase.contains(&Word::from("suli")));
    }

    #[test]
    fn test_compound_head() {
        let phrase = with_context(|ctx| headed_phrase(ctx, &tokenize("tomo tawa kon mute"))).unwrap();
        assert_eq!(phrase.head().to_string(), "tomo tawa kon");
        assert_eq!(phrase.modifiers().len(), 1);
    }

    #[test]
    fn test_particles_inside_phrase() {
        let err = with_context(|ctx| headed_phrase(ctx, &tokenize("jan e moku"))).unwrap_err();
        assert!(matches!(err, ParseError::ParticleInPhrase { particle: Particle::E, .. }));
    }

    #[test]
    fn test_bare_preposition_has_no_complement() {
        let phrases = with_context(|ctx| {
            let tokens = tokenize("~tawa");
            prepositional_phrases(ctx, &[&tokens[..]])
        })
        .unwrap();
        assert_eq!(phrases.len(), 1);
        assert!(phrases[0].complement().is_none());
    }

    #[test]
    fn test_exclamation_shapes() {
        with_context(|ctx| {
            assert!(exclamation(ctx, &tokenize("a")).is_some());
            assert!(exclamation(ctx, &tokenize("pona a")).is_some());
            assert!(exclamation(ctx, &tokenize("mu kin a")).is_some());
            assert!(exclamation(ctx, &tokenize("pona mute")).is_none());
            assert!(exclamation(ctx, &tokenize("jan a")).is_none());
        });
    }
}
