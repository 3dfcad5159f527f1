//! Parties: the two opposing sides of a battle

use crate::core::PartyId;
use crate::{BattleError, Result};
use serde::{Deserialize, Serialize};

/// Which side controls a party's fighters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllingSide {
    /// Human-controlled main characters and their beasts
    Player,
    /// AI-controlled opposition
    Cpu,
}

/// One side of the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub side: ControllingSide,
}

impl Party {
    pub fn new(id: PartyId, side: ControllingSide) -> Self {
        Party { id, side }
    }
}

/// The two registered parties of a battle
///
/// Party ids are unique and fixed for the duration of a game; every fighter
/// must reference one of them. Validated once at construction, so the state
/// machine can assume well-formed membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyPair {
    player: Party,
    cpu: Party,
}

impl PartyPair {
    pub fn new(player_party_id: PartyId, cpu_party_id: PartyId) -> Result<Self> {
        if player_party_id == cpu_party_id {
            return Err(BattleError::DuplicateParty(cpu_party_id.as_u32()));
        }
        Ok(PartyPair {
            player: Party::new(player_party_id, ControllingSide::Player),
            cpu: Party::new(cpu_party_id, ControllingSide::Cpu),
        })
    }

    pub fn player_party_id(&self) -> PartyId {
        self.player.id
    }

    pub fn cpu_party_id(&self) -> PartyId {
        self.cpu.id
    }

    /// Check whether an id references one of the two registered parties
    pub fn contains(&self, id: PartyId) -> bool {
        id == self.player.id || id == self.cpu.id
    }

    /// Which side controls the given party
    pub fn side_of(&self, id: PartyId) -> Option<ControllingSide> {
        if id == self.player.id {
            Some(ControllingSide::Player)
        } else if id == self.cpu.id {
            Some(ControllingSide::Cpu)
        } else {
            None
        }
    }
}
