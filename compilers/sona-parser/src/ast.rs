//! The sentence model. Every node is built once by the parser and never mutated;
//! `Display` renders the normalized text back out (prepositions keep their `~`).

use std::fmt;

use sona_morph::Lexeme;
use sona_protocol::{Particle, Punctuation, Word};

use crate::error::{ParseError, ParseResult};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Anything that can be asked which words it is made of.
pub trait ContainsWord {
    fn words(&self) -> Vec<&Word>;

    fn contains(&self, word: &Word) -> bool {
        self.words().into_iter().any(|w| w == word)
    }
}

/// Modifiers or adverbs: equality ignores order (`jan pona suli` == `jan suli pona`).
#[derive(Debug, Clone, Default, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WordSet(Vec<Lexeme>);

impl WordSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Lexeme> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn sorted(&self) -> Vec<&Lexeme> {
        let mut items: Vec<&Lexeme> = self.0.iter().collect();
        items.sort();
        items
    }
}

impl PartialEq for WordSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.sorted() == other.sorted()
    }
}

impl FromIterator<Lexeme> for WordSet {
    fn from_iter<I: IntoIterator<Item = Lexeme>>(iter: I) -> Self {
        WordSet(iter.into_iter().collect())
    }
}

impl ContainsWord for WordSet {
    fn words(&self) -> Vec<&Word> {
        self.0.iter().flat_map(Lexeme::words).collect()
    }
}

impl fmt::Display for WordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.0.iter(), " ")
    }
}

/// A head word, its modifiers, and any prepositional phrases hanging off it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HeadedPhrase {
    head: Lexeme,
    modifiers: WordSet,
    prepositions: Vec<PrepositionalPhrase>,
}

impl HeadedPhrase {
    pub(crate) fn new(head: Lexeme, modifiers: WordSet, prepositions: Vec<PrepositionalPhrase>) -> Self {
        Self {
            head,
            modifiers,
            prepositions,
        }
    }

    pub fn head(&self) -> &Lexeme {
        &self.head
    }

    pub fn modifiers(&self) -> &WordSet {
        &self.modifiers
    }

    pub fn prepositions(&self) -> &[PrepositionalPhrase] {
        &self.prepositions
    }

    /// A bare single word: no modifiers, no prepositions, not a compound.
    pub fn single_word(&self) -> Option<&Word> {
        if self.modifiers.is_empty() && self.prepositions.is_empty() {
            self.head.as_word()
        } else {
            None
        }
    }
}

impl ContainsWord for HeadedPhrase {
    fn words(&self) -> Vec<&Word> {
        let mut words = self.head.words();
        words.extend(self.modifiers.words());
        words.extend(self.prepositions.iter().flat_map(ContainsWord::words));
        words
    }
}

impl fmt::Display for HeadedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.modifiers.is_empty() {
            write!(f, " {}", self.modifiers)?;
        }
        for preposition in &self.prepositions {
            write!(f, " {}", preposition)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PrepositionalPhrase {
    preposition: Word,
    complement: Option<ComplexChain>,
}

impl PrepositionalPhrase {
    pub(crate) fn new(preposition: Word, complement: Option<ComplexChain>) -> Self {
        Self {
            preposition,
            complement,
        }
    }

    /// The preposition without its `~` marker.
    pub fn preposition(&self) -> &Word {
        &self.preposition
    }

    pub fn complement(&self) -> Option<&ComplexChain> {
        self.complement.as_ref()
    }
}

impl ContainsWord for PrepositionalPhrase {
    fn words(&self) -> Vec<&Word> {
        let mut words = vec![&self.preposition];
        if let Some(complement) = &self.complement {
            words.extend(complement.words());
        }
        words
    }
}

impl fmt::Display for PrepositionalPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}", self.preposition)?;
        if let Some(complement) = &self.complement {
            write!(f, " {}", complement)?;
        }
        Ok(())
    }
}

/// Headed phrases joined by one particle, in practice `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Chain {
    particle: Particle,
    phrases: Vec<HeadedPhrase>,
}

impl Chain {
    pub(crate) fn new(particle: Particle, phrases: Vec<HeadedPhrase>) -> ParseResult<Self> {
        if phrases.is_empty() {
            return Err(ParseError::EmptyArgument { stage: "chain" });
        }
        Ok(Self { particle, phrases })
    }

    pub fn particle(&self) -> Particle {
        self.particle
    }

    pub fn phrases(&self) -> &[HeadedPhrase] {
        &self.phrases
    }
}

impl ContainsWord for Chain {
    fn words(&self) -> Vec<&Word> {
        self.phrases.iter().flat_map(ContainsWord::words).collect()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.phrases.iter(), &format!(" {} ", self.particle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ChainLink {
    Simple(Chain),
    Complex(ComplexChain),
}

impl ChainLink {
    /// Reduces a link to its word when it is nothing more than one bare word.
    pub fn single_word(&self) -> Option<&Word> {
        match self {
            ChainLink::Simple(chain) => match chain.phrases() {
                [phrase] => phrase.single_word(),
                _ => None,
            },
            ChainLink::Complex(complex) => match complex.links() {
                [link] => link.single_word(),
                _ => None,
            },
        }
    }
}

impl ContainsWord for ChainLink {
    fn words(&self) -> Vec<&Word> {
        match self {
            ChainLink::Simple(chain) => chain.words(),
            ChainLink::Complex(complex) => complex.words(),
        }
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainLink::Simple(chain) => write!(f, "{}", chain),
            ChainLink::Complex(complex) => write!(f, "{}", complex),
        }
    }
}

/// Links joined by one particle: `en` for coordination, `pi` for the regrouped
/// reading, `e` for a list of direct objects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComplexChain {
    particle: Particle,
    links: Vec<ChainLink>,
}

impl ComplexChain {
    pub(crate) fn new(particle: Particle, links: Vec<ChainLink>) -> ParseResult<Self> {
        if links.is_empty() {
            return Err(ParseError::EmptyArgument { stage: "complex chain" });
        }
        Ok(Self { particle, links })
    }

    pub fn particle(&self) -> Particle {
        self.particle
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }
}

impl ContainsWord for ComplexChain {
    fn words(&self) -> Vec<&Word> {
        self.links.iter().flat_map(ContainsWord::words).collect()
    }
}

impl fmt::Display for ComplexChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.particle == Particle::E {
            // Every object carries its own marker: "e soweli e kili"
            for (i, link) in self.links.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "e {}", link)?;
            }
            return Ok(());
        }
        write_joined(f, self.links.iter(), &format!(" {} ", self.particle))
    }
}

/// Modals, an optional head verb and its adverbs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VerbPhrase {
    modals: Vec<Lexeme>,
    head: Option<Lexeme>,
    adverbs: WordSet,
}

impl VerbPhrase {
    pub(crate) fn new(modals: Vec<Lexeme>, head: Option<Lexeme>, adverbs: WordSet) -> Self {
        Self {
            modals,
            head,
            adverbs,
        }
    }

    pub fn modals(&self) -> &[Lexeme] {
        &self.modals
    }

    pub fn head(&self) -> Option<&Lexeme> {
        self.head.as_ref()
    }

    pub fn adverbs(&self) -> &WordSet {
        &self.adverbs
    }

    pub fn is_empty(&self) -> bool {
        self.modals.is_empty() && self.head.is_none() && self.adverbs.is_empty()
    }
}

impl ContainsWord for VerbPhrase {
    fn words(&self) -> Vec<&Word> {
        let mut words: Vec<&Word> = self.modals.iter().flat_map(Lexeme::words).collect();
        if let Some(head) = &self.head {
            words.extend(head.words());
        }
        words.extend(self.adverbs.words());
        words
    }
}

impl fmt::Display for VerbPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .modals
            .iter()
            .chain(self.head.iter())
            .chain(self.adverbs.iter());
        write_joined(f, parts, " ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "body", rename_all = "lowercase"))]
pub enum PredicateKind {
    /// `li moku`, `li wile moku`
    Verb(VerbPhrase),
    /// `li jan pi ma suli`
    Nominal(ComplexChain),
    /// `li pi jan pona`, only when the dialect allows it
    Pi(ComplexChain),
}

/// One `li`/`o` clause of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Predicate {
    particle: Particle,
    kind: PredicateKind,
    direct_objects: Option<ComplexChain>,
    prepositions: Vec<PrepositionalPhrase>,
}

impl Predicate {
    pub(crate) fn new(
        particle: Particle,
        kind: PredicateKind,
        direct_objects: Option<ComplexChain>,
        prepositions: Vec<PrepositionalPhrase>,
    ) -> Self {
        Self {
            particle,
            kind,
            direct_objects,
            prepositions,
        }
    }

    pub fn particle(&self) -> Particle {
        self.particle
    }

    pub fn kind(&self) -> &PredicateKind {
        &self.kind
    }

    pub fn verb_phrase(&self) -> Option<&VerbPhrase> {
        match &self.kind {
            PredicateKind::Verb(verb) => Some(verb),
            _ => None,
        }
    }

    pub fn direct_objects(&self) -> Option<&ComplexChain> {
        self.direct_objects.as_ref()
    }

    pub fn prepositions(&self) -> &[PrepositionalPhrase] {
        &self.prepositions
    }

    pub fn is_transitive(&self) -> bool {
        self.direct_objects.is_some()
    }
}

impl ContainsWord for Predicate {
    fn words(&self) -> Vec<&Word> {
        let mut words = match &self.kind {
            PredicateKind::Verb(verb) => verb.words(),
            PredicateKind::Nominal(chain) | PredicateKind::Pi(chain) => chain.words(),
        };
        if let Some(objects) = &self.direct_objects {
            words.extend(objects.words());
        }
        words.extend(self.prepositions.iter().flat_map(ContainsWord::words));
        words
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.particle)?;
        match &self.kind {
            PredicateKind::Verb(verb) if verb.is_empty() => {}
            PredicateKind::Verb(verb) => write!(f, " {}", verb)?,
            PredicateKind::Nominal(chain) => write!(f, " {}", chain)?,
            PredicateKind::Pi(chain) => write!(f, " pi {}", chain)?,
        }
        if let Some(objects) = &self.direct_objects {
            write!(f, " {}", objects)?;
        }
        for preposition in &self.prepositions {
            write!(f, " {}", preposition)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mood {
    #[default]
    Declarative,
    /// `o moku!`, `jan Mato o o moku!`
    Imperative,
    /// `o mi mute li moku`
    Hortative,
}

/// A context clause that is not a full sentence: `tenpo pini la`, `~lon tomo la`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LaFragment {
    Chain(ComplexChain),
    Prepositional(Vec<PrepositionalPhrase>),
}

impl ContainsWord for LaFragment {
    fn words(&self) -> Vec<&Word> {
        match self {
            LaFragment::Chain(chain) => chain.words(),
            LaFragment::Prepositional(phrases) => phrases.iter().flat_map(ContainsWord::words).collect(),
        }
    }
}

impl fmt::Display for LaFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaFragment::Chain(chain) => write!(f, "{}", chain),
            LaFragment::Prepositional(phrases) => write_joined(f, phrases.iter(), " "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SimpleSentence {
    pub(crate) subject: Option<ComplexChain>,
    pub(crate) predicates: Vec<Predicate>,
    pub(crate) punctuation: Option<Punctuation>,
    pub(crate) conjunction: Option<Particle>,
    pub(crate) head_vocatives: Vec<ComplexChain>,
    pub(crate) tag_question: bool,
    pub(crate) mood: Mood,
    pub(crate) placeholder_subject: bool,
    pub(crate) la_fragments: Vec<LaFragment>,
}

impl SimpleSentence {
    /// `None` for an imperative with no stated subject.
    pub fn subject(&self) -> Option<&ComplexChain> {
        self.subject.as_ref()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn punctuation(&self) -> Option<Punctuation> {
        self.punctuation
    }

    pub fn conjunction(&self) -> Option<Particle> {
        self.conjunction
    }

    pub fn head_vocatives(&self) -> &[ComplexChain] {
        &self.head_vocatives
    }

    /// Ends in `anu seme`.
    pub fn is_tag_question(&self) -> bool {
        self.tag_question
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// The subject stands in for the addressee of `X o o Y` and is not rendered.
    pub fn has_placeholder_subject(&self) -> bool {
        self.placeholder_subject
    }

    pub fn la_fragments(&self) -> &[LaFragment] {
        &self.la_fragments
    }
}

impl ContainsWord for SimpleSentence {
    fn words(&self) -> Vec<&Word> {
        let mut words: Vec<&Word> = self.head_vocatives.iter().flat_map(ContainsWord::words).collect();
        words.extend(self.la_fragments.iter().flat_map(ContainsWord::words));
        if let Some(subject) = &self.subject {
            words.extend(subject.words());
        }
        words.extend(self.predicates.iter().flat_map(ContainsWord::words));
        words
    }
}

impl fmt::Display for SimpleSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        for fragment in &self.la_fragments {
            parts.push(format!("{} la", fragment));
        }
        for vocative in &self.head_vocatives {
            parts.push(format!("{} o", vocative));
        }
        if let Some(conjunction) = self.conjunction {
            parts.push(conjunction.to_string());
        }
        if self.mood == Mood::Hortative {
            parts.push(Particle::O.to_string());
        }
        if let Some(subject) = self.subject.as_ref().filter(|_| !self.placeholder_subject) {
            parts.push(subject.to_string());
        }
        parts.extend(self.predicates.iter().map(ToString::to_string));
        if self.tag_question {
            parts.push("anu seme".into());
        }

        f.write_str(&parts.join(" "))?;
        if let Some(punctuation) = self.punctuation {
            write!(f, "{}", punctuation)?;
        }
        Ok(())
    }
}

/// `A la B la C`: every clause but the last is a precondition of the last.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConditionalSentence {
    preconditions: Vec<Sentence>,
    conclusion: Box<Sentence>,
}

impl ConditionalSentence {
    pub(crate) fn new(preconditions: Vec<Sentence>, conclusion: Sentence) -> ParseResult<Self> {
        let misplaced = conclusion.punctuation().is_none()
            || preconditions.iter().any(|p| p.punctuation().is_some());
        if misplaced {
            return Err(ParseError::MisplacedPunctuation {
                fragment: conclusion.to_string(),
            });
        }
        Ok(Self {
            preconditions,
            conclusion: Box::new(conclusion),
        })
    }

    pub fn preconditions(&self) -> &[Sentence] {
        &self.preconditions
    }

    pub fn conclusion(&self) -> &Sentence {
        &self.conclusion
    }
}

impl fmt::Display for ConditionalSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for precondition in &self.preconditions {
            write!(f, "{} la ", precondition)?;
        }
        write!(f, "{}", self.conclusion)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Sentence {
    Simple(SimpleSentence),
    Conditional(ConditionalSentence),
    /// `jan pona o!`
    Vocative {
        addressee: ComplexChain,
        punctuation: Option<Punctuation>,
    },
    /// `tenpo pini la.`, a context with nothing following it
    Fragment {
        fragment: ComplexChain,
        punctuation: Option<Punctuation>,
    },
    /// `a!`, `pona a!`
    Exclamation {
        phrase: HeadedPhrase,
        punctuation: Option<Punctuation>,
    },
    /// `/// ...`
    Comment { text: String },
}

impl Sentence {
    pub fn punctuation(&self) -> Option<Punctuation> {
        match self {
            Sentence::Simple(simple) => simple.punctuation,
            Sentence::Conditional(conditional) => conditional.conclusion.punctuation(),
            Sentence::Vocative { punctuation, .. }
            | Sentence::Fragment { punctuation, .. }
            | Sentence::Exclamation { punctuation, .. } => *punctuation,
            Sentence::Comment { .. } => None,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleSentence> {
        match self {
            Sentence::Simple(simple) => Some(simple),
            _ => None,
        }
    }

    pub fn as_conditional(&self) -> Option<&ConditionalSentence> {
        match self {
            Sentence::Conditional(conditional) => Some(conditional),
            _ => None,
        }
    }

    /// A copy with every terminal punctuation mark removed, for comparisons that ignore it.
    pub fn without_punctuation(&self) -> Sentence {
        let mut sentence = self.clone();
        sentence.clear_punctuation();
        sentence
    }

    fn clear_punctuation(&mut self) {
        match self {
            Sentence::Simple(simple) => simple.punctuation = None,
            Sentence::Conditional(conditional) => conditional.conclusion.clear_punctuation(),
            Sentence::Vocative { punctuation, .. }
            | Sentence::Fragment { punctuation, .. }
            | Sentence::Exclamation { punctuation, .. } => *punctuation = None,
            Sentence::Comment { .. } => {}
        }
    }

    /// Attaches a context fragment in front of those already present.
    ///
    /// Fragments are collected right to left, so prepending keeps source order.
    pub fn with_la_fragment(self, fragment: LaFragment) -> ParseResult<Sentence> {
        match self {
            Sentence::Simple(mut simple) => {
                simple.la_fragments.insert(0, fragment);
                Ok(Sentence::Simple(simple))
            }
            other => Err(ParseError::HeadlessSentence {
                fragment: format!("{} la {}", fragment, other),
            }),
        }
    }

    /// The subject chains and predicates of the sentence, conclusion last.
    pub fn segments(&self) -> Vec<&dyn ContainsWord> {
        match self {
            Sentence::Simple(simple) => {
                let mut segments: Vec<&dyn ContainsWord> = Vec::new();
                if let Some(subject) = &simple.subject {
                    segments.push(subject);
                }
                segments.extend(simple.predicates.iter().map(|p| p as &dyn ContainsWord));
                segments
            }
            Sentence::Conditional(conditional) => conditional
                .preconditions
                .iter()
                .chain(std::iter::once(conditional.conclusion.as_ref()))
                .flat_map(Sentence::segments)
                .collect(),
            Sentence::Vocative { addressee: chain, .. } | Sentence::Fragment { fragment: chain, .. } => {
                vec![chain as &dyn ContainsWord]
            }
            Sentence::Exclamation { phrase, .. } => vec![phrase as &dyn ContainsWord],
            Sentence::Comment { .. } => Vec::new(),
        }
    }
}

impl ContainsWord for Sentence {
    fn words(&self) -> Vec<&Word> {
        match self {
            Sentence::Simple(simple) => simple.words(),
            Sentence::Conditional(conditional) => conditional
                .preconditions
                .iter()
                .chain(std::iter::once(conditional.conclusion.as_ref()))
                .flat_map(ContainsWord::words)
                .collect(),
            Sentence::Vocative { addressee: chain, .. } | Sentence::Fragment { fragment: chain, .. } => {
                chain.words()
            }
            Sentence::Exclamation { phrase, .. } => phrase.words(),
            Sentence::Comment { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Simple(simple) => write!(f, "{}", simple),
            Sentence::Conditional(conditional) => write!(f, "{}", conditional),
            Sentence::Vocative { addressee, punctuation } => {
                write!(f, "{} o", addressee)?;
                write_punctuation(f, *punctuation)
            }
            Sentence::Fragment { fragment, punctuation } => {
                write!(f, "{} la", fragment)?;
                write_punctuation(f, *punctuation)
            }
            Sentence::Exclamation { phrase, punctuation } => {
                write!(f, "{}", phrase)?;
                write_punctuation(f, *punctuation)
            }
            Sentence::Comment { text } => f.write_str(text),
        }
    }
}

fn write_punctuation(f: &mut fmt::Formatter<'_>, punctuation: Option<Punctuation>) -> fmt::Result {
    match punctuation {
        Some(p) => write!(f, "{}", p),
        None => Ok(()),
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
