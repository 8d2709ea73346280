use rkyv::{Archive, Deserialize, Serialize};
use crate::class::WordClass;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One headword and its classification bits (see `WordClass`).
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Entry {
    pub text: String,
    pub class: u32,
}

impl Entry {
    pub fn class(&self) -> WordClass {
        WordClass::from_bits_truncate(self.class)
    }
}

impl ArchivedEntry {
    pub fn class(&self) -> WordClass {
        WordClass::from_bits_truncate(self.class)
    }
}

/// A multi-word unit the dictionary licenses as a single head, e.g. `tomo tawa`.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Compound {
    pub head: String,
    pub tail: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Dictionary {
    pub version: u32,
    pub entries: Vec<Entry>,
    pub compounds: Vec<Compound>,
}
