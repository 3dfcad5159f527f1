//! Turn record for the current round

use crate::core::{FighterId, PartyId};
use serde::{Deserialize, Serialize};

/// Per-round record of who is mid-move
///
/// Created when a round starts, mutated by the engine on every move
/// transition, and replaced wholesale when the next round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Current round number (starts at 1, supplied by the coordinator)
    pub round_number: u32,

    /// Party whose fighter is mid-move
    pub active_party: Option<PartyId>,

    /// Fighter currently mid-move
    pub moving_fighter: Option<FighterId>,
}

impl Default for Turn {
    /// Baseline turn template, merged with round-specific overrides on
    /// every round start
    fn default() -> Self {
        Turn {
            round_number: 1,
            active_party: None,
            moving_fighter: None,
        }
    }
}

impl Turn {
    /// Template plus a round number, as used when a completed round rolls
    /// over into the next one
    pub fn for_round(round_number: u32) -> Self {
        Turn {
            round_number,
            ..Turn::default()
        }
    }

    /// Record a change of the mid-move fighter
    pub fn change_fighter(&mut self, fighter: FighterId, party: PartyId) {
        self.moving_fighter = Some(fighter);
        self.active_party = Some(party);
    }
}
