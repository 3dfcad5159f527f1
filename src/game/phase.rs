//! Move and round phases

use crate::core::ControllingSide;
use serde::{Deserialize, Serialize};

/// Phases of a single fighter's move
///
/// Every move traverses all four phases in order, for AI and player
/// fighters alike; there is no conditional skipping. The phases exist to
/// give external collaborators hook points between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePhase {
    /// The move has been announced
    Declared,
    /// Pre-move computation (spell upkeep, attack options)
    BeforeMove,
    /// The move is executing; resolution is driven externally
    Moving,
    /// The move finished and statuses may advance
    Completed,
}

impl MovePhase {
    /// Get the next phase in pipeline order
    pub fn next(&self) -> Option<MovePhase> {
        match self {
            MovePhase::Declared => Some(MovePhase::BeforeMove),
            MovePhase::BeforeMove => Some(MovePhase::Moving),
            MovePhase::Moving => Some(MovePhase::Completed),
            MovePhase::Completed => None, // End of move
        }
    }
}

/// The scripted side stages a round runs after its movers are exhausted
///
/// Stages always fire in the fixed order player-beasts -> cpu ->
/// cpu-beasts -> completed, regardless of how many fighters each side has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStage {
    /// Individual fighter moves, driven by move-completion events
    FighterMoves,
    /// Player-side beasts resolve
    PlayerBeasts,
    /// CPU main move resolves
    CpuMove,
    /// CPU-side beasts resolve
    CpuBeasts,
    /// Round is complete; the next round may start
    Completed,
}

impl RoundStage {
    /// Get the next stage in round order
    pub fn next(&self) -> Option<RoundStage> {
        match self {
            RoundStage::FighterMoves => Some(RoundStage::PlayerBeasts),
            RoundStage::PlayerBeasts => Some(RoundStage::CpuMove),
            RoundStage::CpuMove => Some(RoundStage::CpuBeasts),
            RoundStage::CpuBeasts => Some(RoundStage::Completed),
            RoundStage::Completed => None, // End of round
        }
    }

    /// Which side's collaborator acts during this stage
    pub fn side(&self) -> Option<ControllingSide> {
        match self {
            RoundStage::PlayerBeasts => Some(ControllingSide::Player),
            RoundStage::CpuMove | RoundStage::CpuBeasts => Some(ControllingSide::Cpu),
            RoundStage::FighterMoves | RoundStage::Completed => None,
        }
    }
}
