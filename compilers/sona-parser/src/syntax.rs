//! Sentence assembly: `la` splitting into preconditions and context fragments, then
//! vocatives, moods and the subject/predicate split of each simple sentence.

use sona_protocol::{Particle, Punctuation, WordClass};
use tracing::{debug, trace};

use crate::ast::{ConditionalSentence, LaFragment, Mood, SimpleSentence, Sentence};
use crate::chain::resolve_coordination;
use crate::context::Context;
use crate::error::{ParseError, ParseResult};
use crate::parser::tokenize;
use crate::phrase::{exclamation, prepositional_phrases};
use crate::predicate::classify_predicate;
use crate::split::{split_before, split_dropping};
use crate::token::{contains, fragment, strip_leading, Span, Token, TokenKind};
use crate::validate::check_particles;

const COMMENT_PREFIX: &str = "///";

/// Stands in for the addressee of `X o o Y` once the vocative has been pulled out.
const PLACEHOLDER_SUBJECT: [&str; 2] = ["jan", "Sanwan"];

pub(crate) fn parse_sentence(ctx: &mut Context<'_>, normalized: &str, original: &str) -> ParseResult<Sentence> {
    let tokens = tokenize(normalized);

    // 1. A trailing li is fatal whatever else is wrong with the sentence
    let last_word = tokens
        .iter()
        .rev()
        .find(|t| matches!(t.kind, TokenKind::Word | TokenKind::Preposition));
    if last_word.is_some_and(|t| t.is(Particle::Li)) {
        return Err(ParseError::TrailingPredicateMarker {
            fragment: original.into(),
        });
    }

    if normalized.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    // 2. Comments are kept verbatim
    if normalized.starts_with(COMMENT_PREFIX) {
        return Ok(Sentence::Comment {
            text: normalized.into(),
        });
    }

    // 3. Particle adjacency, then what the normalizer should already have handled
    check_particles(&tokens, ctx.dialect, normalized)?;

    if normalized.trim() != normalized {
        return Err(ParseError::MalformedInput {
            reason: "leading or trailing whitespace",
            fragment: normalized.into(),
        });
    }
    if matches!(tokens.first().and_then(Token::particle), Some(Particle::Li | Particle::La)) {
        return Err(ParseError::MalformedInput {
            reason: "sentence starts with a bare marker",
            fragment: normalized.into(),
        });
    }

    // 4. Quote marks, terminal punctuation and commas
    let (words, punctuation) = sentence_words(&tokens, normalized)?;
    if words.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    parse_conditional(ctx, &words, punctuation.unwrap_or_default(), original)
}

/// Drops quote marks and commas and takes off the terminal punctuation.
/// Any other punctuation inside the sentence is an error.
fn sentence_words<'a>(tokens: &[Token<'a>], sentence: &str) -> ParseResult<(Vec<Token<'a>>, Option<Punctuation>)> {
    let mut tokens: Vec<Token<'a>> = tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Quote(_)))
        .copied()
        .collect();

    let punctuation = match tokens.last().map(|t| t.kind) {
        Some(TokenKind::Punctuation(c)) => Punctuation::try_from(c).ok(),
        _ => None,
    };
    if punctuation.is_some() {
        tokens.pop();
    }

    let mut words = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.kind {
            TokenKind::Punctuation(',') => continue,
            TokenKind::Punctuation(symbol) => {
                return Err(ParseError::UnexpectedPunctuation {
                    symbol,
                    fragment: sentence.into(),
                })
            }
            _ => words.push(token),
        }
    }
    Ok((words, punctuation))
}

/// `A la B la C.`: the last clause is the head. Walking back from it, clauses with a
/// predicate become preconditions; the rest are context fragments attached to the
/// nearest precondition to their right, or to the head when there is none yet.
fn parse_conditional(
    ctx: &mut Context<'_>,
    tokens: &[Token<'_>],
    punctuation: Punctuation,
    original: &str,
) -> ParseResult<Sentence> {
    let la_parts = split_before(tokens, |t| t.is(Particle::La));

    // `tenpo pini la.` has nothing after the marker
    if let Some(last) = la_parts.last().filter(|part| part.len() == 1 && la_parts.len() > 1) {
        trace!(marker = last[0].text, "sentence ends at la");
        if la_parts.len() > 2 {
            return Err(ParseError::HeadlessSentence {
                fragment: original.into(),
            });
        }
        return Ok(Sentence::Fragment {
            fragment: resolve_coordination(ctx, la_parts[0])?,
            punctuation: Some(punctuation),
        });
    }

    let clauses: Vec<Vec<Token<'_>>> = la_parts
        .iter()
        .map(|part| with_pronoun_marker(ctx, strip_leading(part, Particle::La)))
        .collect();
    let Some((conclusion, context)) = clauses.split_last() else {
        return Err(ParseError::EmptyInput);
    };

    let mut head = parse_simple(ctx, conclusion, Some(punctuation))?;
    let mut preconditions: Vec<Sentence> = Vec::new();

    for clause in context.iter().rev() {
        if clause.is_empty() {
            return Err(ParseError::EmptySpan {
                what: "la clause",
                fragment: original.into(),
            });
        }
        if contains(clause, Particle::Li) {
            preconditions.push(parse_simple(ctx, clause, None)?);
            continue;
        }

        let fragment = la_fragment(ctx, clause)?;
        match preconditions.pop() {
            Some(nearest) => preconditions.push(nearest.with_la_fragment(fragment)?),
            None => head = head.with_la_fragment(fragment)?,
        }
    }

    if preconditions.is_empty() {
        return Ok(head);
    }
    preconditions.reverse();
    Ok(Sentence::Conditional(ConditionalSentence::new(preconditions, head)?))
}

fn la_fragment(ctx: &mut Context<'_>, clause: &[Token<'_>]) -> ParseResult<LaFragment> {
    if clause[0].is_preposition() {
        let pieces = split_before(clause, Token::is_preposition);
        return Ok(LaFragment::Prepositional(prepositional_phrases(ctx, &pieces)?));
    }
    Ok(LaFragment::Chain(resolve_coordination(ctx, clause)?))
}

/// `mi moku` / `sina wile` leave out the li after a bare mi or sina. Put it back when
/// the clause has no li or o of its own.
fn with_pronoun_marker<'a>(ctx: &Context<'_>, clause: &[Token<'a>]) -> Vec<Token<'a>> {
    let mut tokens = clause.to_vec();
    if contains(clause, Particle::Li) || contains(clause, Particle::O) {
        return tokens;
    }

    let start = match clause.first().and_then(Token::particle) {
        Some(particle) if particle.is_conjunction() => 1,
        _ => 0,
    };
    let [pronoun, next, ..] = &clause[start.min(clause.len())..] else {
        return tokens;
    };
    if !matches!(pronoun.text, "mi" | "sina") || next.particle().is_some() || next.is_preposition() {
        return tokens;
    }
    // `mi mute`, `mi tu`: a numbered pronoun needs its li spelled out
    if ctx.lexicon.classify(next.text).contains(WordClass::NUMERAL) {
        return tokens;
    }

    let at = pronoun.span.end;
    tokens.insert(start + 1, Token::word(Span::new(at, at), Particle::Li.word()));
    tokens
}

pub(crate) fn parse_simple(
    ctx: &mut Context<'_>,
    tokens: &[Token<'_>],
    punctuation: Option<Punctuation>,
) -> ParseResult<Sentence> {
    let whole = fragment(tokens);
    let mut tokens: Vec<Token<'_>> = tokens.to_vec();
    let mut head_vocatives = Vec::new();
    let mut mood = Mood::Declarative;
    let mut placeholder_subject = false;

    let double_o = tokens
        .windows(2)
        .position(|pair| pair[0].is(Particle::O) && pair[1].is(Particle::O))
        .filter(|&at| at > 0);

    if let Some(at) = double_o {
        // a. `jan Mato o o moku` -> vocative, then `jan Sanwan o moku`
        for addressee in split_dropping(&tokens[..at], |t| t.is(Particle::O)) {
            if !addressee.is_empty() {
                head_vocatives.push(resolve_coordination(ctx, addressee)?);
            }
        }
        // `jan Mato o o!` has nothing to order, so it only calls out
        if tokens.len() == at + 2 {
            return match head_vocatives.pop() {
                Some(addressee) if head_vocatives.is_empty() => Ok(Sentence::Vocative { addressee, punctuation }),
                _ => Err(ParseError::EmptySpan {
                    what: "imperative",
                    fragment: whole,
                }),
            };
        }
        let span = Span::new(tokens[at].span.start, tokens[at + 1].span.end);
        let mut rewritten: Vec<Token<'_>> = PLACEHOLDER_SUBJECT.iter().map(|&w| Token::word(span, w)).collect();
        rewritten.push(Token::word(span, Particle::O.word()));
        rewritten.extend_from_slice(&tokens[at + 2..]);
        tokens = rewritten;
        mood = Mood::Imperative;
        placeholder_subject = true;
    } else if has_inner_o(&tokens) && contains(&tokens, Particle::Li) {
        // b. `jan Sonja o, mi li moku` -> vocatives, then whatever follows the last o
        let addressees = split_dropping(&tokens, |t| t.is(Particle::O));
        for addressee in &addressees[..addressees.len() - 1] {
            if contains(addressee, Particle::Li) || contains(addressee, Particle::E) {
                break;
            }
            if !addressee.is_empty() {
                head_vocatives.push(resolve_coordination(ctx, addressee)?);
            }
        }
        if let Some(last_o) = tokens.iter().rposition(|t| t.is(Particle::O)) {
            tokens.drain(..=last_o);
        }
        // `jan o, li moku`: the comma hid the pair from the adjacency check
        if let Some(second) = tokens.first().and_then(Token::particle).filter(|p| Particle::STRUCTURAL.contains(p)) {
            return Err(ParseError::IllegalParticleSequence {
                first: Particle::O,
                second,
                fragment: whole,
            });
        }
    }

    // c. Leading conjunction
    let conjunction = match tokens.as_slice() {
        [first, _, ..] => first.particle().filter(|p| p.is_conjunction()),
        _ => None,
    };
    if conjunction.is_some() {
        tokens.remove(0);
    }

    // d. Tag question
    let tag_question = tokens.len() > 2
        && tokens[tokens.len() - 2].is(Particle::Anu)
        && tokens[tokens.len() - 1].text == "seme";
    if tag_question {
        tokens.truncate(tokens.len() - 2);
    }

    if tokens.last().is_some_and(|t| t.is(Particle::Li)) {
        return Err(ParseError::TrailingPredicateMarker { fragment: whole });
    }

    // e. Every la was consumed by the conditional split
    if contains(&tokens, Particle::La) {
        return Err(ParseError::UnexpectedConditional { fragment: whole });
    }

    // f. Mood
    if tokens.first().is_some_and(|t| t.is(Particle::O)) {
        if contains(&tokens, Particle::Li) {
            mood = Mood::Hortative;
            tokens.remove(0);
        } else {
            mood = Mood::Imperative;
        }
    }

    if tokens.is_empty() {
        return Err(ParseError::EmptySpan {
            what: "sentence",
            fragment: whole,
        });
    }

    // g. Subject | predicates
    let parts = split_before(&tokens, |t| t.is(Particle::Li) || t.is(Particle::O));

    if let [only] = parts.as_slice() {
        if let Some(phrase) = exclamation(ctx, only) {
            return Ok(Sentence::Exclamation { phrase, punctuation });
        }
    }

    // h. `jan pona o!`
    if let [addressee, last] = parts.as_slice() {
        if last.len() == 1 && last[0].is(Particle::O) {
            return Ok(Sentence::Vocative {
                addressee: resolve_coordination(ctx, addressee)?,
                punctuation,
            });
        }
    }

    // i. An o-led sentence has no stated subject
    let (subject, predicate_parts) = if parts[0][0].is(Particle::O) {
        (None, &parts[..])
    } else {
        (Some(resolve_coordination(ctx, parts[0])?), &parts[1..])
    };
    if predicate_parts.is_empty() {
        return Err(ParseError::MissingPredicate { fragment: whole });
    }

    let predicates = predicate_parts
        .iter()
        .map(|part| classify_predicate(ctx, part))
        .collect::<ParseResult<Vec<_>>>()?;

    debug!(
        sentence = %whole,
        predicates = predicates.len(),
        vocatives = head_vocatives.len(),
        ?mood,
        "simple sentence"
    );

    Ok(Sentence::Simple(SimpleSentence {
        subject,
        predicates,
        punctuation,
        conjunction,
        head_vocatives,
        tag_question,
        mood,
        placeholder_subject,
        la_fragments: Vec::new(),
    }))
}

/// An `o` somewhere after the first token, with something after it.
fn has_inner_o(tokens: &[Token<'_>]) -> bool {
    tokens.len() > 2 && tokens[1..tokens.len() - 1].iter().any(|t| t.is(Particle::O))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ContainsWord, PredicateKind};
    use crate::cache::ParseCache;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use sona_protocol::{Dialect, Vocabulary, Word};

    fn parse(text: &str) -> ParseResult<Sentence> {
        let vocabulary = Vocabulary::builtin();
        let mut cache = ParseCache::new();
        let mut ctx = Context {
            lexicon: &vocabulary,
            dialect: Dialect::default(),
            cache: &mut cache,
        };
        parse_sentence(&mut ctx, text, text)
    }

    fn simple(sentence: &Sentence) -> &SimpleSentence {
        sentence.as_simple().expect("Expected a simple sentence")
    }

    #[test]
    fn test_head_vocative_before_sentence() {
        let sentence = parse("jan Sonja o, mi li moku.").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.head_vocatives().len(), 1);
        assert_eq!(simple.head_vocatives()[0].to_string(), "jan Sonja");
        assert_eq!(simple.subject().unwrap().to_string(), "mi");
        assert_eq!(simple.mood(), Mood::Declarative);
    }

    #[test]
    fn test_double_o_gets_placeholder_subject() {
        let sentence = parse("jan Mato o o moku!").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.head_vocatives()[0].to_string(), "jan Mato");
        assert_eq!(simple.subject().unwrap().to_string(), "jan Sanwan");
        assert!(simple.has_placeholder_subject());
        assert_eq!(simple.predicates()[0].particle(), Particle::O);
        assert_eq!(simple.mood(), Mood::Imperative);
        assert_eq!(sentence.to_string(), "jan Mato o o moku!");
        assert_eq!(parse(&sentence.to_string()).unwrap(), sentence);
    }

    #[test]
    fn test_double_o_without_command_is_vocative() {
        match parse("jan Mato o o!").unwrap() {
            Sentence::Vocative { addressee, punctuation } => {
                assert_eq!(addressee.to_string(), "jan Mato");
                assert_eq!(punctuation, Some(Punctuation::Exclamation));
            }
            other => panic!("Expected a vocative, got {:?}", other),
        }
        assert!(matches!(parse("jan o soweli o o!"), Err(ParseError::EmptySpan { .. })));
    }

    #[test]
    fn test_vocative_renders_before_conjunction() {
        let sentence = parse("jan Sonja o taso mi li moku.").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.conjunction(), Some(Particle::Taso));
        assert_eq!(simple.head_vocatives()[0].to_string(), "jan Sonja");
        assert_eq!(sentence.to_string(), "jan Sonja o taso mi li moku.");
        assert_eq!(parse(&sentence.to_string()).unwrap(), sentence);
    }

    #[test]
    fn test_hortative() {
        let sentence = parse("o mi mute li moku.").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.mood(), Mood::Hortative);
        assert_eq!(simple.subject().unwrap().to_string(), "mi mute");
        assert_eq!(sentence.to_string(), "o mi mute li moku.");
    }

    #[test]
    fn test_conjunction_and_tag_question() {
        let sentence = parse("taso sina li pona anu seme?").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.conjunction(), Some(Particle::Taso));
        assert!(simple.is_tag_question());
        assert_eq!(simple.punctuation(), Some(Punctuation::Question));
        assert_eq!(sentence.to_string(), "taso sina li pona anu seme?");
    }

    #[test]
    fn test_context_fragments_keep_source_order() {
        let sentence = parse("tenpo pini la ~lon tomo la mi li lape.").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.la_fragments().len(), 2);
        assert!(matches!(simple.la_fragments()[0], LaFragment::Chain(_)));
        assert!(matches!(simple.la_fragments()[1], LaFragment::Prepositional(_)));
        assert_eq!(sentence.to_string(), "tenpo pini la ~lon tomo la mi li lape.");
    }

    #[test]
    fn test_fragment_attaches_to_nearest_precondition() {
        let sentence = parse("tenpo ni la sina li kama la mi li pona.").unwrap();
        let conditional = sentence.as_conditional().unwrap();

        let precondition = simple(&conditional.preconditions()[0]);
        assert_eq!(precondition.la_fragments().len(), 1);
        assert!(simple(conditional.conclusion()).la_fragments().is_empty());
    }

    #[test]
    fn test_fragment_sentence() {
        let sentence = parse("tenpo pini la.").unwrap();
        match sentence {
            Sentence::Fragment { fragment, punctuation } => {
                assert_eq!(fragment.to_string(), "tenpo pini");
                assert_eq!(punctuation, Some(Punctuation::Period));
            }
            other => panic!("Expected a fragment, got {:?}", other),
        }
    }

    #[test]
    fn test_vocative_and_exclamation() {
        assert!(matches!(parse("jan pona o!").unwrap(), Sentence::Vocative { .. }));
        assert!(matches!(parse("pona a!").unwrap(), Sentence::Exclamation { .. }));
        assert!(matches!(parse("a").unwrap(), Sentence::Exclamation { .. }));
    }

    #[test]
    fn test_quotes_and_commas_are_dropped() {
        let sentence = parse("«jan li moku, li lape.»").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.predicates().len(), 2);
        assert_eq!(simple.punctuation(), Some(Punctuation::Period));
    }

    #[test]
    fn test_comment_is_verbatim() {
        let sentence = parse("/// jan li li moku").unwrap();
        assert_eq!(sentence, Sentence::Comment { text: "/// jan li li moku".into() });
        assert!(sentence.words().is_empty());
    }

    #[test]
    fn test_pronoun_subject_without_li() {
        let sentence = parse("mi moku e kili.").unwrap();
        let simple = simple(&sentence);

        assert_eq!(simple.subject().unwrap().to_string(), "mi");
        assert!(simple.predicates()[0].is_transitive());
        assert!(sentence.contains(&Word::from("kili")));
    }

    #[test]
    fn test_numbered_pronoun_keeps_fragment_reading() {
        let sentence = parse("mi mute la ona li pona.").unwrap();
        assert_eq!(simple(&sentence).la_fragments().len(), 1);
    }

    #[test]
    fn test_pi_predicate() {
        let sentence = parse("ona li pi jan pona.").unwrap();
        assert!(matches!(simple(&sentence).predicates()[0].kind(), PredicateKind::Pi(_)));
    }

    #[test]
    fn test_error_kinds() {
        let cases = [
            ("", ErrorKind::Argument),
            (" jan li moku", ErrorKind::Argument),
            ("li moku", ErrorKind::Argument),
            ("jan li e moku.", ErrorKind::Syntax),
            ("jan li.", ErrorKind::Syntax),
            ("jan e e moku.", ErrorKind::Grammar),
            ("jan pona.", ErrorKind::Grammar),
            ("jan li moku. mi li lape", ErrorKind::Grammar),
            ("jan li moku e ~tawa ma.", ErrorKind::Grammar),
            ("jan o li moku.", ErrorKind::Syntax),
            ("jan o, li moku.", ErrorKind::Syntax),
        ];

        for (text, kind) in cases {
            let err = parse(text).expect_err(text);
            assert_eq!(err.kind(), kind, "'{}': {}", text, err);
        }
    }
}
