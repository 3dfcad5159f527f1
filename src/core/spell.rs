//! Spell records carried on the event surface
//!
//! Spell effects are resolved by external collaborators. The core only
//! forwards expiration bookkeeping, so a spell here is id plus a counter.

use crate::core::SpellId;
use serde::{Deserialize, Serialize};

/// A spell applied to a fighter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,

    pub name: String,

    /// Remaining rounds before the spell wears off
    pub expiration: u32,
}

impl Spell {
    pub fn new(id: SpellId, name: impl Into<String>, expiration: u32) -> Self {
        Spell {
            id,
            name: name.into(),
            expiration,
        }
    }
}
