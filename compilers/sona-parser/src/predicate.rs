use sona_morph::Lexeme;
use sona_protocol::{Particle, Word};
use tracing::trace;

use crate::ast::{ChainLink, ComplexChain, Predicate, PredicateKind, PrepositionalPhrase, VerbPhrase};
use crate::chain::resolve_pi_chain;
use crate::context::Context;
use crate::error::{ParseError, ParseResult};
use crate::phrase::{lexemes, prepositional_phrases};
use crate::split::split_before;
use crate::token::{contains, fragment, Token};

/// Classifies one `li ...` / `o ...` clause.
pub(crate) fn classify_predicate(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<Predicate> {
    if tokens.len() < 2 {
        return Err(ParseError::EmptySpan {
            what: "predicate",
            fragment: fragment(tokens),
        });
    }

    if contains(tokens, Particle::E) {
        transitive(ctx, tokens)
    } else {
        intransitive(ctx, tokens)
    }
}

fn governing_particle(tokens: &[Token<'_>], whole: &[Token<'_>]) -> ParseResult<Particle> {
    match tokens.first().and_then(Token::particle) {
        Some(particle) if particle.is_governing() => Ok(particle),
        _ => Err(ParseError::MissingGoverningParticle {
            found: tokens.first().map(|t| t.text).unwrap_or_default().into(),
            fragment: fragment(whole),
        }),
    }
}

/// `li moku e kili e telo ~kepeken ilo`
fn transitive(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<Predicate> {
    // 1. Verb part, then one piece per object
    let pieces = split_before(tokens, |t| t.is(Particle::E));
    let (verb_part, object_parts) = pieces.split_first().ok_or(ParseError::EmptyArgument { stage: "predicate" })?;
    let particle = governing_particle(verb_part, tokens)?;

    let kind = match &verb_part[1..] {
        [] => PredicateKind::Verb(VerbPhrase::default()),
        [first, rest @ ..] if first.is(Particle::Pi) => PredicateKind::Pi(nominal(ctx, rest)?),
        rest if contains(rest, Particle::Pi) => PredicateKind::Nominal(nominal(ctx, rest)?),
        rest => PredicateKind::Verb(verb_phrase(ctx, rest)),
    };

    // 2. Prepositions trail the last object and belong to the predicate
    let degenerate = || ParseError::DegenerateObject {
        fragment: fragment(tokens),
    };
    let (last, leading) = object_parts.split_last().ok_or_else(degenerate)?;
    let last_pieces = split_before(last, Token::is_preposition);
    let (last_object, trailing) = last_pieces.split_first().ok_or_else(degenerate)?;

    let mut objects = Vec::with_capacity(object_parts.len());
    for part in leading.iter().chain(std::iter::once(last_object)) {
        if part.len() < 2 {
            return Err(degenerate());
        }
        objects.push(ChainLink::Simple(resolve_pi_chain(ctx, &part[1..])?));
    }

    let prepositions = prepositional_phrases(ctx, trailing)?;
    Ok(Predicate::new(
        particle,
        kind,
        Some(ComplexChain::new(Particle::E, objects)?),
        prepositions,
    ))
}

/// `li pona`, `li jan pi ma ni`, `li pi jan pona`, `li lon ~tawa ma`
fn intransitive(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<Predicate> {
    let pieces = split_before(tokens, Token::is_preposition);
    let (verb_part, preposition_parts) = pieces.split_first().ok_or(ParseError::EmptyArgument { stage: "predicate" })?;
    let particle = governing_particle(verb_part, tokens)?;

    let mut kind = match &verb_part[1..] {
        [] => None,
        [first, rest @ ..] if first.is(Particle::Pi) => Some(PredicateKind::Pi(nominal(ctx, rest)?)),
        rest if contains(rest, Particle::Pi) => Some(PredicateKind::Nominal(nominal(ctx, rest)?)),
        rest => Some(PredicateKind::Verb(verb_phrase(ctx, rest))),
    };

    let mut prepositions = Vec::with_capacity(preposition_parts.len());
    for part in preposition_parts {
        match *part {
            // `li ~tawa`: with nothing else to act as the verb, the preposition is the verb
            [preposition] if kind.is_none() => {
                trace!(preposition = preposition.bare(), "bare preposition promoted to verb");
                let head = Lexeme::Simple(Word::new(preposition.bare()));
                kind = Some(PredicateKind::Verb(VerbPhrase::new(Vec::new(), Some(head), Default::default())));
            }
            [preposition] => prepositions.push(PrepositionalPhrase::new(Word::new(preposition.bare()), None)),
            _ => prepositions.extend(prepositional_phrases(ctx, &[*part])?),
        }
    }

    Ok(Predicate::new(
        particle,
        kind.unwrap_or_else(|| PredicateKind::Verb(VerbPhrase::default())),
        None,
        prepositions,
    ))
}

/// A nominal predicate is a single pi chain wrapped as coordination.
fn nominal(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<ComplexChain> {
    let chain = resolve_pi_chain(ctx, tokens)?;
    ComplexChain::new(Particle::En, vec![ChainLink::Simple(chain)])
}

/// Modals are taken while no head has been seen; the first non-modal is the head and
/// everything after it is an adverb. When every word is modal-shaped (`li wile`) the
/// phrase is re-read with no modals at all.
fn verb_phrase(ctx: &Context<'_>, tokens: &[Token<'_>]) -> VerbPhrase {
    let words = lexemes(ctx, tokens);

    let is_modal = |lexeme: &Lexeme| {
        lexeme
            .as_word()
            .is_some_and(|word| ctx.lexicon.is_modal(word.as_str()))
    };

    let phrase = split_verb_phrase(&words, is_modal).or_else(|| {
        trace!(fragment = %fragment(tokens), "no head verb after modals, reading without modals");
        split_verb_phrase(&words, |_| false)
    });

    phrase.unwrap_or_default()
}

fn split_verb_phrase(words: &[Lexeme], is_modal: impl Fn(&Lexeme) -> bool) -> Option<VerbPhrase> {
    let head_at = words.iter().position(|word| !is_modal(word))?;
    Some(VerbPhrase::new(
        words[..head_at].to_vec(),
        Some(words[head_at].clone()),
        words[head_at + 1..].iter().cloned().collect(),
    ))
}
