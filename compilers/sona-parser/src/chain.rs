//! Subject, object and complement chains: `pi` regrouping and `en` coordination.

use sona_protocol::Particle;
use tracing::debug;

use crate::ast::{Chain, ChainLink, ComplexChain};
use crate::context::Context;
use crate::error::{ParseError, ParseResult};
use crate::phrase::headed_phrase;
use crate::split::split_dropping;
use crate::token::{contains, fragment, Token};

/// `jan pi ma suli` -> a pi chain of headed phrases. Memoized by text.
pub(crate) fn resolve_pi_chain(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<Chain> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyArgument { stage: "pi chain" });
    }
    if contains(tokens, Particle::La) {
        return Err(ParseError::ParticleInChain {
            particle: Particle::La,
            stage: "pi chain",
            fragment: fragment(tokens),
        });
    }

    let key = fragment(tokens);
    if let Some(chain) = ctx.cache.chain(&key) {
        return Ok(chain);
    }

    let phrases = split_dropping(tokens, |t| t.is(Particle::Pi))
        .into_iter()
        .map(|piece| headed_phrase(ctx, piece))
        .collect::<ParseResult<Vec<_>>>()?;
    let chain = Chain::new(Particle::Pi, phrases)?;

    ctx.cache.remember_chain(key, &chain);
    Ok(chain)
}

/// Resolves a subject-like span: coordination first, then modification.
///
/// `kule pi walo en pimeja` leaves a single bare word after the final `pi` when read
/// that way, which is rejected; with an `en` present the span is re-read as
/// modification of a coordination (`kule pi [walo en pimeja]`) instead.
pub(crate) fn resolve_coordination(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<ComplexChain> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyArgument { stage: "coordination chain" });
    }
    for particle in [Particle::La, Particle::Li] {
        if contains(tokens, particle) {
            return Err(ParseError::ParticleInChain {
                particle,
                stage: "coordination chain",
                fragment: fragment(tokens),
            });
        }
    }

    let chain = coordinate_then_modify(ctx, tokens)?;
    match check_final_modifier(ctx, &chain, tokens) {
        Ok(()) => Ok(chain),
        Err(violation) if contains(tokens, Particle::En) => {
            debug!(fragment = %fragment(tokens), %violation, "retrying as modification of a coordination");
            modify_then_coordinate(ctx, tokens)
        }
        Err(violation) => Err(violation),
    }
}

/// `A pi B en C pi D` -> en[ pi[A, B], pi[C, D] ]
fn coordinate_then_modify(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<ComplexChain> {
    let mut coordinated = Vec::new();
    for piece in split_dropping(tokens, |t| t.is(Particle::En)) {
        if piece.is_empty() {
            continue;
        }
        let modified = split_dropping(piece, |t| t.is(Particle::Pi))
            .into_iter()
            .map(|part| resolve_pi_chain(ctx, part).map(ChainLink::Simple))
            .collect::<ParseResult<Vec<_>>>()?;
        coordinated.push(ChainLink::Complex(ComplexChain::new(Particle::Pi, modified)?));
    }
    ComplexChain::new(Particle::En, coordinated)
}

/// `A pi B en C` -> pi[ en[A], en[B, C] ]. Not re-validated.
fn modify_then_coordinate(ctx: &mut Context<'_>, tokens: &[Token<'_>]) -> ParseResult<ComplexChain> {
    let mut modified = Vec::new();
    for piece in split_dropping(tokens, |t| t.is(Particle::Pi)) {
        if piece.is_empty() {
            continue;
        }
        let mut coordinated = Vec::new();
        for part in split_dropping(piece, |t| t.is(Particle::En)) {
            if part.is_empty() {
                continue;
            }
            coordinated.push(ChainLink::Simple(resolve_pi_chain(ctx, part)?));
        }
        modified.push(ChainLink::Complex(ComplexChain::new(Particle::En, coordinated)?));
    }
    ComplexChain::new(Particle::Pi, modified)
}

/// The last `pi` of the first coordinated piece must introduce at least two words.
/// A multi-character Poman numeral (`pi #ATLW`) counts as enough.
fn check_final_modifier(ctx: &Context<'_>, chain: &ComplexChain, tokens: &[Token<'_>]) -> ParseResult<()> {
    let Some(ChainLink::Complex(first)) = chain.links().first() else {
        return Ok(());
    };
    if first.links().len() < 2 {
        return Ok(());
    }
    let Some(word) = first.links().last().and_then(ChainLink::single_word) else {
        return Ok(());
    };

    let text = word.as_str();
    if ctx.lexicon.is_numeral_literal(text) && text.trim_start_matches('#').chars().count() > 1 {
        return Ok(());
    }
    Err(ParseError::DanglingModifier {
        fragment: fragment(tokens),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ParseCache;
    use crate::error::ErrorKind;
    use crate::parser::tokenize;
    use proptest::prelude::*;
    use sona_protocol::{Dialect, Vocabulary};

    fn resolve(text: &str) -> ParseResult<ComplexChain> {
        let vocabulary = Vocabulary::builtin();
        let mut cache = ParseCache::new();
        let mut ctx = Context {
            lexicon: &vocabulary,
            dialect: Dialect::default(),
            cache: &mut cache,
        };
        resolve_coordination(&mut ctx, &tokenize(text))
    }

    #[test]
    fn test_coordination_nests_pi_inside_en() {
        let chain = resolve("jan pi ma suli en soweli").unwrap();

        assert_eq!(chain.particle(), Particle::En);
        assert_eq!(chain.links().len(), 2);
        match &chain.links()[0] {
            ChainLink::Complex(pi) => {
                assert_eq!(pi.particle(), Particle::Pi);
                assert_eq!(pi.links().len(), 2);
            }
            other => panic!("Expected a pi group, got {:?}", other),
        }
        assert_eq!(chain.to_string(), "jan pi ma suli en soweli");
    }

    #[test]
    fn test_dangling_modifier_is_rejected() {
        let err = resolve("kule pi walo").unwrap_err();
        assert!(matches!(err, ParseError::DanglingModifier { .. }));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_dangling_modifier_falls_back_to_modification_first() {
        let chain = resolve("kule pi walo en pimeja").unwrap();

        assert_eq!(chain.particle(), Particle::Pi);
        assert_eq!(chain.links().len(), 2);
        match &chain.links()[1] {
            ChainLink::Complex(en) => {
                assert_eq!(en.particle(), Particle::En);
                assert_eq!(en.links().len(), 2);
            }
            other => panic!("Expected an en group, got {:?}", other),
        }
    }

    #[test]
    fn test_poman_numeral_may_stand_alone_after_pi() {
        assert!(resolve("tomo pi #ATLW").is_ok());
        assert!(matches!(resolve("tomo pi #A"), Err(ParseError::DanglingModifier { .. })));
    }

    #[test]
    fn test_compound_after_pi_is_not_a_single_word() {
        assert!(resolve("jan pi tomo tawa").is_ok());
    }

    #[test]
    fn test_predicate_markers_are_rejected() {
        let err = resolve("mi li moku").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert!(matches!(resolve(""), Err(ParseError::EmptyArgument { .. })));
    }

    #[test]
    fn test_pi_chain_is_cached() {
        let vocabulary = Vocabulary::builtin();
        let mut cache = ParseCache::new();
        let tokens = tokenize("jan pi ma suli");
        {
            let mut ctx = Context {
                lexicon: &vocabulary,
                dialect: Dialect::default(),
                cache: &mut cache,
            };
            let first = resolve_pi_chain(&mut ctx, &tokens).unwrap();
            let second = resolve_pi_chain(&mut ctx, &tokens).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(cache.hits(), 1);
    }

    fn all_links_present(chain: &ComplexChain) -> bool {
        !chain.links().is_empty()
            && chain.links().iter().all(|link| match link {
                ChainLink::Simple(simple) => !simple.phrases().is_empty(),
                ChainLink::Complex(complex) => all_links_present(complex),
            })
    }

    proptest! {
        #[test]
        fn test_coordination_is_never_empty(
            words in prop::collection::vec(
                prop::sample::select(vec!["jan", "pona", "soweli", "walo", "pi", "en", "#ATLW"]),
                0..8,
            )
        ) {
            let text = words.join(" ");
            if let Ok(chain) = resolve(&text) {
                prop_assert!(all_links_present(&chain), "'{}' -> {:?}", text, chain);
            }
        }
    }
}
