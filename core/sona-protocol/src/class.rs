#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

bitflags! {
    /// Dictionary classification of a word. A word may carry several classes
    /// (e.g. `tawa` is both a content word and a preposition).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct WordClass: u32 {
        // Closed-class markers (li, e, la, pi, en, o, ...)
        const PARTICLE = 1;

        // Open-class words that can head a phrase
        const CONTENT = 2;

        // Pre-verbs consumed before the head verb
        const MODAL = 4;

        // Words that can open a prepositional phrase
        const PREPOSITION = 8;

        // Words that stand alone as an exclamation
        const INTERJECTION = 16;

        // Number words (wan, tu, luka, ...) and numeral literals
        const NUMERAL = 32;

        // Capitalised proper modifiers (names, loan words)
        const PROPER = 64;
    }
}
