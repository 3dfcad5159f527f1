//! Turn engine
//!
//! Sequences game -> round -> move phases and the per-round side-stage
//! quartet. Every transition is a pure mapping from one processed event to
//! the events it emits; emitted events join a FIFO queue and are processed
//! strictly in emission order against the single owned state. External
//! collaborators drive move resolution by dispatching `MoveStarted` and
//! `MoveCompleted`.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating all format! allocations.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.state.logger.log_verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::core::{FighterId, MoveStatus, PartyId};
use crate::game::coordinator::BattleCoordinator;
use crate::game::events::{BattleEvent, FighterChange};
use crate::game::phase::{MovePhase, RoundStage};
use crate::game::resolver::find_next_fighter;
use crate::game::state::BattleState;
use crate::game::turn::Turn;
use crate::{BattleError, Result};
use smallvec::{smallvec, SmallVec};
use std::collections::VecDeque;

/// Verbosity level for battle output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during battle
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - rounds, phases, and key transitions (default)
    #[default]
    Normal = 2,
    /// Verbose - every event and suppression
    Verbose = 3,
}

/// Lifecycle of the engine itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Constructed, game not yet started
    Idle,
    /// Game in progress
    Running,
    /// Terminal; no further transitions execute
    Ended,
}

/// Events emitted by a single transition (almost always zero to two)
type Emitted = SmallVec<[BattleEvent; 2]>;

/// Turn/phase orchestrator
///
/// Owns the battle state exclusively; all mutation happens here, one event
/// at a time, which stands in for the original's single-threaded store
/// without any locking.
pub struct TurnEngine<C: BattleCoordinator> {
    /// The battle state (single writer: this engine)
    pub state: BattleState,

    coordinator: C,

    /// Pending events, processed strictly FIFO
    queue: VecDeque<BattleEvent>,

    status: EngineStatus,

    /// Phase of the move currently in flight (None between moves)
    move_phase: Option<MovePhase>,

    /// Stage the current round is in
    round_stage: Option<RoundStage>,

    /// Set once GameEnded is processed; guarded stages are torn down
    cancelled: bool,

    /// Every processed (non-suppressed) event, in order
    journal: Vec<BattleEvent>,
}

impl<C: BattleCoordinator> TurnEngine<C> {
    /// Create an engine for the given state and coordinator
    pub fn new(state: BattleState, coordinator: C) -> Self {
        TurnEngine {
            state,
            coordinator,
            queue: VecDeque::new(),
            status: EngineStatus::Idle,
            move_phase: None,
            round_stage: None,
            cancelled: false,
            journal: Vec::new(),
        }
    }

    /// Set verbosity level for battle output
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.state.logger.set_verbosity(verbosity);
        self
    }

    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut C {
        &mut self.coordinator
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Phase of the move currently in flight
    pub fn move_phase(&self) -> Option<MovePhase> {
        self.move_phase
    }

    /// Stage the current round is in
    pub fn round_stage(&self) -> Option<RoundStage> {
        self.round_stage
    }

    /// Every processed event, in processing order
    pub fn journal(&self) -> &[BattleEvent] {
        &self.journal
    }

    /// Start a game with the given player fighter mid-move
    ///
    /// Data-entry validation happens here: the fighter must be registered
    /// and the party must be one of the two sides. Past this point the
    /// machine assumes well-formed input.
    pub fn start_game(&mut self, player_id: FighterId, player_party_id: PartyId) -> Result<()> {
        match self.status {
            EngineStatus::Idle => {}
            EngineStatus::Running => return Err(BattleError::GameAlreadyStarted),
            EngineStatus::Ended => return Err(BattleError::GameAlreadyEnded),
        }
        self.state.fighter(player_id)?;
        if !self.state.parties().contains(player_party_id) {
            return Err(BattleError::UnknownParty(player_party_id.as_u32()));
        }

        self.status = EngineStatus::Running;
        self.dispatch(BattleEvent::GameStarted {
            player_id,
            player_party_id,
        })
    }

    /// Dispatch the game-ended event, tearing down all stage subscriptions
    pub fn end_game(&mut self) -> Result<()> {
        self.dispatch(BattleEvent::GameEnded)
    }

    /// Feed one event into the machine and process it (plus everything it
    /// emits, transitively) to completion
    pub fn dispatch(&mut self, event: BattleEvent) -> Result<()> {
        self.queue.push_back(event);
        self.drain()
    }

    /// Drive the current round to completion: start and complete each
    /// mover's pipeline until the round exhausts, then let the quartet run
    /// and the next round start.
    ///
    /// Returns once the next round has begun (or the game ended). Move
    /// completion is externally driven by design; this driver is the
    /// built-in external caller used by the binary and the tests.
    pub fn run_round(&mut self) -> Result<()> {
        match self.status {
            EngineStatus::Idle => return Err(BattleError::GameNotStarted),
            EngineStatus::Ended => return Err(BattleError::GameAlreadyEnded),
            EngineStatus::Running => {}
        }
        let starting_round = self
            .state
            .turn
            .as_ref()
            .map(|t| t.round_number)
            .ok_or(BattleError::GameNotStarted)?;

        loop {
            if self.status != EngineStatus::Running || self.cancellation_fired() {
                break;
            }
            let Some(turn) = self.state.turn.as_ref() else {
                break;
            };
            if turn.round_number != starting_round || turn.moving_fighter.is_none() {
                break;
            }
            if self.move_phase.is_none() {
                self.dispatch(BattleEvent::MoveStarted)?;
            } else {
                self.dispatch(BattleEvent::MoveCompleted)?;
            }
        }
        Ok(())
    }

    /// Run up to `rounds` full rounds, ending the game early if the
    /// coordinator raises its game-ended signal
    pub fn run_rounds(&mut self, rounds: u32) -> Result<()> {
        for _ in 0..rounds {
            if self.status != EngineStatus::Running {
                break;
            }
            self.run_round()?;
            if self.cancellation_fired() && self.status == EngineStatus::Running {
                self.end_game()?;
            }
        }
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        while let Some(event) = self.queue.pop_front() {
            let emitted = self.handle(event)?;
            self.queue.extend(emitted);
        }
        Ok(())
    }

    /// Game-ended cancellation: the engine's own terminal flag or the
    /// coordinator's signal source
    fn cancellation_fired(&self) -> bool {
        self.cancelled || self.coordinator.game_ended()
    }

    /// Process one event: apply its state transition and return what it
    /// emits
    fn handle(&mut self, event: BattleEvent) -> Result<Emitted> {
        if self.status == EngineStatus::Ended {
            log_if_verbose!(self, "suppressed after game end: {}", event.name());
            return Ok(Emitted::new());
        }
        if event.is_cancellable_stage() && self.cancellation_fired() {
            log_if_verbose!(self, "suppressed by cancellation: {}", event.name());
            return Ok(Emitted::new());
        }

        self.state.logger.log_event(event.name());
        self.journal.push(event.clone());

        let emitted: Emitted = match event {
            BattleEvent::GameStarted {
                player_id,
                player_party_id,
            } => {
                self.status = EngineStatus::Running;
                self.coordinator.on_game_started();
                let turn = Turn {
                    round_number: self.coordinator.current_round(),
                    active_party: Some(player_party_id),
                    moving_fighter: Some(player_id),
                };
                smallvec![BattleEvent::TurnStarted { turn }]
            }

            BattleEvent::TurnStarted { mut turn } => {
                self.state.reset_move_statuses();
                // A rolled-over round names no mover; ask the resolver for
                // the first one.
                if turn.moving_fighter.is_none() {
                    if let Some(next) = find_next_fighter(self.state.combined_view()) {
                        turn.change_fighter(next.id, next.party_id);
                    }
                }
                if let Some(party_id) = turn.active_party {
                    if !self.state.parties().contains(party_id) {
                        return Err(BattleError::UnknownParty(party_id.as_u32()));
                    }
                }
                if let Some(fighter_id) = turn.moving_fighter {
                    self.state.set_move_status(fighter_id, MoveStatus::Moving)?;
                }
                self.state.logger.log_normal(&format!(
                    "round {} started",
                    turn.round_number
                ));
                self.state.turn = Some(turn);
                self.round_stage = Some(RoundStage::FighterMoves);
                self.move_phase = None;
                self.coordinator.on_turn_started();
                smallvec![BattleEvent::MoveStarted]
            }

            BattleEvent::MoveStarted => {
                self.move_phase = Some(MovePhase::Declared);
                self.coordinator.on_player_move_started();
                // Side-effect-only sink: the computation is pulled here and
                // its result deliberately dropped.
                let vectors = self.coordinator.calculate_attack_vectors();
                log_if_verbose!(self, "attack vectors computed: {} option(s)", vectors.len());
                drop(vectors);
                smallvec![BattleEvent::PhaseBeforeMove]
            }

            BattleEvent::PhaseBeforeMove => {
                debug_assert_eq!(self.move_phase, Some(MovePhase::Declared));
                self.move_phase = Some(MovePhase::BeforeMove);
                smallvec![BattleEvent::PhaseMoving]
            }

            BattleEvent::PhaseMoving => {
                debug_assert_eq!(self.move_phase, Some(MovePhase::BeforeMove));
                self.move_phase = Some(MovePhase::Moving);
                // Resolution of the actual move is driven externally and
                // re-enters via MoveCompleted.
                Emitted::new()
            }

            BattleEvent::MoveCompleted => {
                let turn = self.state.turn.as_ref().ok_or(BattleError::GameNotStarted)?;
                let current = turn.moving_fighter.ok_or(BattleError::NoMovingFighter)?;
                self.state.fighter(current)?;
                self.move_phase = Some(MovePhase::Completed);

                match find_next_fighter(self.state.combined_view()).map(|f| (f.id, f.party_id)) {
                    Some((next_id, next_party_id)) => smallvec![
                        BattleEvent::UpdateFighters {
                            changes: vec![
                                FighterChange {
                                    id: current,
                                    move_status: MoveStatus::Moved,
                                },
                                FighterChange {
                                    id: next_id,
                                    move_status: MoveStatus::Moving,
                                },
                            ],
                        },
                        BattleEvent::TurnChangeNextFighter {
                            next_fighter_id: next_id,
                            next_party_id,
                        },
                    ],
                    None => smallvec![
                        BattleEvent::UpdateFighters {
                            changes: vec![FighterChange {
                                id: current,
                                move_status: MoveStatus::Moved,
                            }],
                        },
                        BattleEvent::NextTurn,
                    ],
                }
            }

            BattleEvent::UpdateFighters { changes } => {
                for change in &changes {
                    self.state.set_move_status(change.id, change.move_status)?;
                }
                Emitted::new()
            }

            BattleEvent::TurnChangeNextFighter {
                next_fighter_id,
                next_party_id,
            } => {
                let turn = self
                    .state
                    .turn
                    .as_mut()
                    .ok_or(BattleError::GameNotStarted)?;
                turn.change_fighter(next_fighter_id, next_party_id);
                // Await the next externally dispatched MoveStarted.
                self.move_phase = None;
                Emitted::new()
            }

            BattleEvent::NextTurn => {
                // Round exhausted: hand control to the side-stage quartet.
                self.move_phase = None;
                smallvec![BattleEvent::PlayerBeastsMoveStarted]
            }

            BattleEvent::ApplySpellToFighter { spell } => {
                // Pure forwarding; expiration bookkeeping lives outside.
                smallvec![BattleEvent::ReduceSpellExpiration { spell_id: spell.id }]
            }

            BattleEvent::ReduceSpellExpiration { spell_id } => {
                log_if_verbose!(self, "spell {} expiration reduced externally", spell_id);
                Emitted::new()
            }

            BattleEvent::PlayerBeastsMoveStarted => {
                self.round_stage = Some(RoundStage::PlayerBeasts);
                self.coordinator.on_player_beasts_move_started();
                smallvec![BattleEvent::PlayerBeastsMoveCompleted]
            }

            BattleEvent::PlayerBeastsMoveCompleted => {
                self.coordinator.on_player_beasts_move_completed();
                smallvec![BattleEvent::CpuMoveStarted]
            }

            BattleEvent::CpuMoveStarted => {
                self.round_stage = Some(RoundStage::CpuMove);
                self.coordinator.on_cpu_move_started();
                smallvec![BattleEvent::CpuMoveCompleted]
            }

            BattleEvent::CpuMoveCompleted => {
                self.coordinator.on_cpu_move_completed();
                smallvec![BattleEvent::CpuBeastsMoveStarted]
            }

            BattleEvent::CpuBeastsMoveStarted => {
                self.round_stage = Some(RoundStage::CpuBeasts);
                self.coordinator.on_cpu_beasts_move_started();
                smallvec![BattleEvent::CpuBeastsMoveCompleted]
            }

            BattleEvent::CpuBeastsMoveCompleted => {
                self.coordinator.on_cpu_beasts_move_completed();
                smallvec![BattleEvent::TurnCompleted]
            }

            BattleEvent::TurnCompleted => {
                self.round_stage = Some(RoundStage::Completed);
                self.coordinator.on_turn_completed();
                // New round from the default turn template; the round
                // number is the coordinator's, not computed locally.
                smallvec![BattleEvent::TurnStarted {
                    turn: Turn::for_round(self.coordinator.current_round()),
                }]
            }

            BattleEvent::GameEnded => {
                self.coordinator.on_game_ended();
                self.cancelled = true;
                self.status = EngineStatus::Ended;
                self.state.logger.log_minimal("game ended");
                Emitted::new()
            }
        };

        Ok(emitted)
    }
}
