//! Fighter representation

use crate::core::{FighterId, FighterName, PartyId};
use serde::{Deserialize, Serialize};

/// Per-fighter move state within a round
///
/// Reset to `Idle` for every fighter when a round starts. At most one
/// fighter is `Moving` at a time during an active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    /// Has not moved this round
    #[default]
    Idle,
    /// Currently mid-move
    Moving,
    /// Finished its move this round
    Moved,
}

impl MoveStatus {
    pub fn has_moved(&self) -> bool {
        matches!(self, MoveStatus::Moved)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, MoveStatus::Moving)
    }
}

/// A combatant: a player-controlled main character or an AI-controlled beast
///
/// Combat attributes (health, spells, equipment) are owned by external
/// collaborators; the core tracks only identity, membership, and move state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    /// Unique id for this fighter
    pub id: FighterId,

    /// Display name
    pub name: FighterName,

    /// Party this fighter belongs to
    pub party_id: PartyId,

    /// Move state for the current round
    pub move_status: MoveStatus,
}

impl Fighter {
    pub fn new(id: FighterId, name: impl Into<FighterName>, party_id: PartyId) -> Self {
        Fighter {
            id,
            name: name.into(),
            party_id,
            move_status: MoveStatus::Idle,
        }
    }
}
