//! Event surface of the battle core
//!
//! Every transition is "on event X, emit event Y": external collaborators
//! dispatch the consumed events (game start, move start, move completion,
//! spell application) and observe the produced ones. The engine processes
//! them strictly FIFO.

use crate::core::{FighterId, MoveStatus, PartyId, Spell, SpellId};
use crate::game::Turn;
use serde::{Deserialize, Serialize};

/// Partial-update record for one fighter
///
/// Only the fields the core owns are patched; fighters are never replaced
/// wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterChange {
    pub id: FighterId,
    pub move_status: MoveStatus,
}

/// Events consumed and produced by the turn engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A game begins with the given player fighter mid-move
    GameStarted {
        player_id: FighterId,
        player_party_id: PartyId,
    },

    /// A round begins with the given turn record
    TurnStarted { turn: Turn },

    /// The mid-move fighter's move is declared
    MoveStarted,

    /// Hook point before the move executes
    PhaseBeforeMove,

    /// The move is executing; resolution is driven externally
    PhaseMoving,

    /// External resolution of the current move finished
    MoveCompleted,

    /// Move-status patches to apply to the roster
    UpdateFighters { changes: Vec<FighterChange> },

    /// The mid-move fighter changed to the given fighter
    TurnChangeNextFighter {
        next_fighter_id: FighterId,
        next_party_id: PartyId,
    },

    /// Every fighter has moved; the round is exhausted
    NextTurn,

    /// A spell lands on a fighter; forwarded as expiration bookkeeping
    ApplySpellToFighter { spell: Spell },

    /// Tick down the named spell's remaining rounds (handled externally)
    ReduceSpellExpiration { spell_id: SpellId },

    // Side-stage quartet, fixed order player-beasts -> cpu -> cpu-beasts.
    PlayerBeastsMoveStarted,
    PlayerBeastsMoveCompleted,
    CpuMoveStarted,
    CpuMoveCompleted,
    CpuBeastsMoveStarted,
    CpuBeastsMoveCompleted,

    /// The round (all four stages) is complete
    TurnCompleted,

    /// Terminal: tear down all stage subscriptions
    GameEnded,
}

impl BattleEvent {
    /// Short name used by the logger and the event journal
    pub fn name(&self) -> &'static str {
        match self {
            BattleEvent::GameStarted { .. } => "gameStarted",
            BattleEvent::TurnStarted { .. } => "turnStarted",
            BattleEvent::MoveStarted => "moveStarted",
            BattleEvent::PhaseBeforeMove => "phaseBeforeMove",
            BattleEvent::PhaseMoving => "phaseMoving",
            BattleEvent::MoveCompleted => "moveCompleted",
            BattleEvent::UpdateFighters { .. } => "updateFighters",
            BattleEvent::TurnChangeNextFighter { .. } => "turnChangeNextFighter",
            BattleEvent::NextTurn => "nextTurn",
            BattleEvent::ApplySpellToFighter { .. } => "applySpellToFighter",
            BattleEvent::ReduceSpellExpiration { .. } => "reduceSpellExpiration",
            BattleEvent::PlayerBeastsMoveStarted => "playerBeastsMoveStarted",
            BattleEvent::PlayerBeastsMoveCompleted => "playerBeastsMoveCompleted",
            BattleEvent::CpuMoveStarted => "cpuMoveStarted",
            BattleEvent::CpuMoveCompleted => "cpuMoveCompleted",
            BattleEvent::CpuBeastsMoveStarted => "cpuBeastsMoveStarted",
            BattleEvent::CpuBeastsMoveCompleted => "cpuBeastsMoveCompleted",
            BattleEvent::TurnCompleted => "turnCompleted",
            BattleEvent::GameEnded => "gameEnded",
        }
    }

    /// Side-stage events scoped to the game-ended cancellation signal
    ///
    /// Once that signal fires these no longer produce transitions, even if
    /// already in flight.
    pub fn is_cancellable_stage(&self) -> bool {
        matches!(
            self,
            BattleEvent::PlayerBeastsMoveStarted
                | BattleEvent::PlayerBeastsMoveCompleted
                | BattleEvent::CpuMoveStarted
                | BattleEvent::CpuMoveCompleted
                | BattleEvent::CpuBeastsMoveStarted
                | BattleEvent::CpuBeastsMoveCompleted
        )
    }
}
