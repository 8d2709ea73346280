//! The built-in toki pona vocabulary (the pu word list plus a few common compounds).

use alloc::string::String;
use alloc::vec::Vec;

use crate::class::WordClass;
use crate::model::{Compound, Dictionary, Entry};

const X: u32 = WordClass::PARTICLE.bits();
const C: u32 = WordClass::CONTENT.bits();
const M: u32 = WordClass::MODAL.bits();
const P: u32 = WordClass::PREPOSITION.bits();
const I: u32 = WordClass::INTERJECTION.bits();
const N: u32 = WordClass::NUMERAL.bits();

const WORDS: &[(&str, u32)] = &[
    ("a", X | I),
    ("akesi", C),
    ("ala", C),
    ("alasa", C | M),
    ("ale", C | N),
    ("ali", C | N),
    ("anpa", C),
    ("ante", C),
    ("anu", X),
    ("awen", C | M),
    ("e", X),
    ("en", X),
    ("esun", C),
    ("ijo", C),
    ("ike", C | I),
    ("ilo", C),
    ("insa", C),
    ("jaki", C),
    ("jan", C),
    ("jelo", C),
    ("jo", C),
    ("kala", C),
    ("kalama", C),
    ("kama", C | M),
    ("kasi", C),
    ("ken", C | M),
    ("kepeken", C | P),
    ("kili", C),
    ("kin", X | C),
    ("kiwen", C),
    ("ko", C),
    ("kon", C),
    ("kule", C),
    ("kulupu", C),
    ("kute", C),
    ("la", X),
    ("lape", C),
    ("laso", C),
    ("lawa", C),
    ("len", C),
    ("lete", C),
    ("li", X),
    ("lili", C),
    ("linja", C),
    ("lipu", C),
    ("loje", C),
    ("lon", C | P),
    ("luka", C | N),
    ("lukin", C | M),
    ("lupa", C),
    ("ma", C),
    ("mama", C),
    ("mani", C),
    ("meli", C),
    ("mi", C),
    ("mije", C),
    ("moku", C),
    ("moli", C),
    ("monsi", C),
    ("mu", C | I),
    ("mun", C),
    ("musi", C),
    ("mute", C | N),
    ("nanpa", C),
    ("nasa", C),
    ("nasin", C),
    ("nena", C),
    ("ni", C),
    ("nimi", C),
    ("noka", C),
    ("o", X | I),
    ("olin", C),
    ("ona", C),
    ("open", C | M),
    ("pakala", C | I),
    ("pali", C),
    ("palisa", C),
    ("pan", C),
    ("pana", C),
    ("pi", X),
    ("pilin", C),
    ("pimeja", C),
    ("pini", C | M),
    ("pipi", C),
    ("poka", C),
    ("poki", C),
    ("pona", C | I),
    ("pu", C),
    ("sama", C | P),
    ("seli", C),
    ("selo", C),
    ("seme", C),
    ("sewi", C),
    ("sijelo", C),
    ("sike", C),
    ("sin", C),
    ("sina", C),
    ("sinpin", C),
    ("sitelen", C),
    ("sona", C | M),
    ("soweli", C),
    ("suli", C),
    ("suno", C),
    ("supa", C),
    ("suwi", C),
    ("tan", C | P),
    ("taso", X | C),
    ("tawa", C | P),
    ("telo", C),
    ("tenpo", C),
    ("toki", C | I),
    ("tomo", C),
    ("tu", C | N),
    ("unpa", C),
    ("uta", C),
    ("utala", C),
    ("walo", C),
    ("wan", C | N),
    ("waso", C),
    ("wawa", C),
    ("weka", C),
    ("wile", C | M),
];

const COMPOUNDS: &[&[&str]] = &[
    &["tomo", "tawa"],
    &["tomo", "tawa", "kon"],
    &["tomo", "tawa", "telo"],
    &["jan", "lawa"],
    &["telo", "nasa"],
    &["ma", "tomo"],
    &["ilo", "sona"],
    &["tenpo", "suno"],
];

impl Dictionary {
    /// The vocabulary that ships with the engine. Used when no compiled lexicon is supplied.
    pub fn builtin() -> Dictionary {
        let entries = WORDS
            .iter()
            .map(|&(text, class)| Entry {
                text: String::from(text),
                class,
            })
            .collect();

        let compounds = COMPOUNDS
            .iter()
            .map(|words| Compound {
                head: String::from(words[0]),
                tail: words[1..].iter().map(|w| String::from(*w)).collect::<Vec<_>>(),
            })
            .collect();

        Dictionary {
            version: 1,
            entries,
            compounds,
        }
    }
}
