use sona_protocol::{Dialect, Particle};

use crate::error::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};

/// Rejects structural particles standing next to each other.
///
/// Doubles (`li li`, `e e`, ...) are checked over the whole sentence before mixed pairs
/// (`li e`, `pi la`, ...), so a sentence with both reports the double. A vocative `o`
/// may not run straight into a structural particle either (`jan o li`). Punctuation
/// between two particles breaks adjacency.
pub fn check_particles(tokens: &[Token<'_>], dialect: Dialect, sentence: &str) -> ParseResult<()> {
    let words = || {
        tokens
            .windows(2)
            .filter(|pair| pair[0].kind == TokenKind::Word && pair[1].kind == TokenKind::Word)
    };
    let pairs = || words().filter_map(|pair| structural(&pair[0]).zip(structural(&pair[1])));

    if let Some((particle, _)) = pairs().find(|(first, second)| first == second) {
        return Err(ParseError::DoubleParticle {
            particle,
            fragment: sentence.into(),
        });
    }

    let after_o = words()
        .filter(|pair| pair[0].is(Particle::O))
        .find_map(|pair| structural(&pair[1]));
    if let Some(second) = after_o {
        return Err(ParseError::IllegalParticleSequence {
            first: Particle::O,
            second,
            fragment: sentence.into(),
        });
    }

    for (first, second) in pairs() {
        if first == Particle::Li && second == Particle::Pi && dialect.li_pi_is_valid {
            continue;
        }
        return Err(ParseError::IllegalParticleSequence {
            first,
            second,
            fragment: sentence.into(),
        });
    }

    Ok(())
}

fn structural(token: &Token<'_>) -> Option<Particle> {
    token.particle().filter(|p| Particle::STRUCTURAL.contains(p))
}
