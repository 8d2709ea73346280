use sona_protocol::{Dialect, Lexicon};

use crate::cache::ParseCache;

/// Everything a parse step needs besides the tokens it is working on.
pub(crate) struct Context<'c> {
    pub lexicon: &'c dyn Lexicon,
    pub dialect: Dialect,
    pub cache: &'c mut ParseCache,
}
