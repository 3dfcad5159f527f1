//! Battle coordination boundary
//!
//! This module defines the interface between the turn engine and the
//! collaborator that owns combat resolution, AI decisions, and
//! presentation. The engine calls the coordinator at every phase
//! transition and inspects nothing it returns except the round number.

use crate::core::FighterId;
use serde::{Deserialize, Serialize};

/// A computed attack option for the fighter currently mid-move
///
/// Produced by the coordinator's lazy attack-vector computation; the
/// engine pulls the list when a move starts and passes it through without
/// inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackVector {
    pub assaulter: FighterId,
    pub target: FighterId,
}

/// Battle-coordination collaborator
///
/// Implement this trait to connect the turn engine to combat math, AI, or
/// UI. Phase hooks default to no-ops so implementations override only what
/// they observe; all hooks are opaque effectful calls from the engine's
/// point of view.
pub trait BattleCoordinator {
    fn on_game_started(&mut self) {}
    fn on_turn_started(&mut self) {}
    fn on_player_move_started(&mut self) {}
    fn on_player_beasts_move_started(&mut self) {}
    fn on_player_beasts_move_completed(&mut self) {}
    fn on_cpu_move_started(&mut self) {}
    fn on_cpu_move_completed(&mut self) {}
    fn on_cpu_beasts_move_started(&mut self) {}
    fn on_cpu_beasts_move_completed(&mut self) {}
    fn on_turn_completed(&mut self) {}
    fn on_game_ended(&mut self) {}

    /// Round number for the turn being started
    ///
    /// Monotonically increasing and owned by the coordinator; the engine
    /// treats it as opaque state.
    fn current_round(&self) -> u32;

    /// Lazily computed attack options for the fighter entering its move
    ///
    /// The engine pulls this during move start and discards the result;
    /// the computation is a side-effect-only sink in the current design.
    fn calculate_attack_vectors(&mut self) -> Vec<AttackVector> {
        Vec::new()
    }

    /// Cancellation signal: once this reports true, side-stage events no
    /// longer produce transitions.
    fn game_ended(&self) -> bool {
        false
    }
}

/// Coordinator with a fixed round schedule (for tests and the demo binary)
///
/// Advances its round counter as rounds complete and optionally raises the
/// game-ended signal once a target round has finished.
#[derive(Debug, Clone)]
pub struct ScriptedCoordinator {
    round: u32,
    end_after_round: Option<u32>,
    game_over: bool,
}

impl ScriptedCoordinator {
    pub fn new() -> Self {
        ScriptedCoordinator {
            round: 1,
            end_after_round: None,
            game_over: false,
        }
    }

    /// Raise the game-ended signal once the given round completes
    pub fn with_end_after_round(mut self, round: u32) -> Self {
        self.end_after_round = Some(round);
        self
    }

    pub fn round(&self) -> u32 {
        self.round
    }
}

impl Default for ScriptedCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleCoordinator for ScriptedCoordinator {
    fn on_turn_completed(&mut self) {
        if self.end_after_round == Some(self.round) {
            self.game_over = true;
        } else {
            self.round += 1;
        }
    }

    fn current_round(&self) -> u32 {
        self.round
    }

    fn game_ended(&self) -> bool {
        self.game_over
    }
}

/// Wrapper that records every hook invocation in order, for assertions
pub struct RecordingCoordinator<C: BattleCoordinator> {
    inner: C,
    calls: Vec<&'static str>,
}

impl<C: BattleCoordinator> RecordingCoordinator<C> {
    pub fn new(inner: C) -> Self {
        RecordingCoordinator {
            inner,
            calls: Vec::new(),
        }
    }

    /// Hook names in invocation order
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: BattleCoordinator> BattleCoordinator for RecordingCoordinator<C> {
    fn on_game_started(&mut self) {
        self.calls.push("onGameStarted");
        self.inner.on_game_started();
    }

    fn on_turn_started(&mut self) {
        self.calls.push("onTurnStarted");
        self.inner.on_turn_started();
    }

    fn on_player_move_started(&mut self) {
        self.calls.push("onPlayerMoveStarted");
        self.inner.on_player_move_started();
    }

    fn on_player_beasts_move_started(&mut self) {
        self.calls.push("onPlayerBeastsMoveStarted");
        self.inner.on_player_beasts_move_started();
    }

    fn on_player_beasts_move_completed(&mut self) {
        self.calls.push("onPlayerBeastsMoveCompleted");
        self.inner.on_player_beasts_move_completed();
    }

    fn on_cpu_move_started(&mut self) {
        self.calls.push("onCpuMoveStarted");
        self.inner.on_cpu_move_started();
    }

    fn on_cpu_move_completed(&mut self) {
        self.calls.push("onCpuMoveCompleted");
        self.inner.on_cpu_move_completed();
    }

    fn on_cpu_beasts_move_started(&mut self) {
        self.calls.push("onCpuBeastsMoveStarted");
        self.inner.on_cpu_beasts_move_started();
    }

    fn on_cpu_beasts_move_completed(&mut self) {
        self.calls.push("onCpuBeastsMoveCompleted");
        self.inner.on_cpu_beasts_move_completed();
    }

    fn on_turn_completed(&mut self) {
        self.calls.push("onTurnCompleted");
        self.inner.on_turn_completed();
    }

    fn on_game_ended(&mut self) {
        self.calls.push("onGameEnded");
        self.inner.on_game_ended();
    }

    fn current_round(&self) -> u32 {
        self.inner.current_round()
    }

    fn calculate_attack_vectors(&mut self) -> Vec<AttackVector> {
        self.calls.push("calculateAttackVectors");
        self.inner.calculate_attack_vectors()
    }

    fn game_ended(&self) -> bool {
        self.inner.game_ended()
    }
}
