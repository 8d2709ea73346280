#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Dialect variation the grammar engine tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dialect {
    /// Allow `li pi ...` (a predicate regrouped by `pi` right after `li`).
    pub li_pi_is_valid: bool,
}

impl Dialect {
    /// Rejects every structural particle adjacency, `li pi` included.
    pub const fn strict() -> Self {
        Self { li_pi_is_valid: false }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self { li_pi_is_valid: true }
    }
}
