#![no_std] // Critical for WASM/Embedded compatibility

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod class;
pub mod word;

// Re-export core types for convenience
pub use class::WordClass;
pub use word::*;

pub mod model;
pub use model::*;

pub mod builtin;
pub mod dialect;
pub mod lexicon;

pub use dialect::Dialect;
pub use lexicon::{is_poman_numeral, Lexicon, Vocabulary};
