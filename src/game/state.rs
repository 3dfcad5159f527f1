//! Main battle state structure

use crate::core::{Fighter, FighterId, MoveStatus, PartyPair};
use crate::game::resolver::CombinedFightersParties;
use crate::game::{BattleLogger, Turn};
use crate::{BattleError, Result};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Complete battle state
///
/// Owned exclusively by the turn engine: single-writer discipline stands in
/// for the store's serialized mutation, so no locking is needed. The roster
/// keeps registration order (the resolver depends on it being stable), with
/// a hash index for O(1) id lookup.
#[derive(Debug, Clone, Serialize)]
pub struct BattleState {
    /// All fighters, in registration order
    fighters: Vec<Fighter>,

    /// Fighter id -> roster slot
    #[serde(skip)]
    fighter_index: FxHashMap<FighterId, usize>,

    /// The two opposing parties
    parties: PartyPair,

    /// Current round's turn record (None before game start)
    pub turn: Option<Turn>,

    /// Centralized logger for battle events
    #[serde(skip)]
    pub logger: BattleLogger,
}

impl BattleState {
    /// Create a battle with the given parties and an empty roster
    pub fn new(parties: PartyPair) -> Self {
        BattleState {
            fighters: Vec::new(),
            fighter_index: FxHashMap::default(),
            parties,
            turn: None,
            logger: BattleLogger::new(),
        }
    }

    /// Register a fighter at the end of the roster
    ///
    /// This is the data-entry validation point: unknown party references
    /// and duplicate ids are rejected here so the state machine can assume
    /// well-formed input.
    pub fn register_fighter(&mut self, fighter: Fighter) -> Result<()> {
        if !self.parties.contains(fighter.party_id) {
            return Err(BattleError::UnknownParty(fighter.party_id.as_u32()));
        }
        if self.fighter_index.contains_key(&fighter.id) {
            return Err(BattleError::DuplicateFighter(fighter.id.as_u32()));
        }
        self.fighter_index.insert(fighter.id, self.fighters.len());
        self.fighters.push(fighter);
        Ok(())
    }

    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    pub fn parties(&self) -> &PartyPair {
        &self.parties
    }

    /// Read-only composite handed to the resolver
    pub fn combined_view(&self) -> CombinedFightersParties<'_> {
        (&self.fighters, &self.parties)
    }

    /// Get a fighter by id
    pub fn fighter(&self, id: FighterId) -> Result<&Fighter> {
        self.fighter_index
            .get(&id)
            .map(|&idx| &self.fighters[idx])
            .ok_or(BattleError::UnknownFighter(id.as_u32()))
    }

    /// Get a mutable fighter by id
    pub fn fighter_mut(&mut self, id: FighterId) -> Result<&mut Fighter> {
        match self.fighter_index.get(&id) {
            Some(&idx) => Ok(&mut self.fighters[idx]),
            None => Err(BattleError::UnknownFighter(id.as_u32())),
        }
    }

    /// Patch one fighter's move status
    pub fn set_move_status(&mut self, id: FighterId, status: MoveStatus) -> Result<()> {
        self.fighter_mut(id)?.move_status = status;
        Ok(())
    }

    /// Reset every fighter to idle (round start)
    pub fn reset_move_statuses(&mut self) {
        for fighter in &mut self.fighters {
            fighter.move_status = MoveStatus::Idle;
        }
    }

    /// The fighter currently mid-move, if any
    pub fn moving_fighter(&self) -> Option<&Fighter> {
        let id = self.turn.as_ref()?.moving_fighter?;
        self.fighter(id).ok()
    }
}
