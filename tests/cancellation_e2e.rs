//! Game-ended cancellation semantics
//!
//! Once the game-ended signal fires, side-stage events must stop producing
//! transitions even when they are already in flight, and the coordinator
//! must see the end exactly once.

use beast_arena::core::{Fighter, FighterId, PartyId, PartyPair};
use beast_arena::game::{
    BattleCoordinator, BattleEvent, BattleState, EngineStatus, RecordingCoordinator,
    ScriptedCoordinator, TurnEngine, VerbosityLevel,
};
use similar_asserts::assert_eq;

const PLAYER_PARTY: PartyId = PartyId::new(1);
const CPU_PARTY: PartyId = PartyId::new(2);

fn started_engine() -> TurnEngine<RecordingCoordinator<ScriptedCoordinator>> {
    let mut state = BattleState::new(PartyPair::new(PLAYER_PARTY, CPU_PARTY).unwrap());
    state.logger.set_verbosity(VerbosityLevel::Silent);
    state
        .register_fighter(Fighter::new(FighterId::new(1), "Aldric", PLAYER_PARTY))
        .unwrap();
    state
        .register_fighter(Fighter::new(FighterId::new(2), "Dire Wolf", CPU_PARTY))
        .unwrap();

    let mut engine = TurnEngine::new(state, RecordingCoordinator::new(ScriptedCoordinator::new()));
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine
}

#[test]
fn test_stage_events_are_inert_after_game_end() {
    let mut engine = started_engine();
    engine.end_game().unwrap();
    assert_eq!(engine.status(), EngineStatus::Ended);

    let journal_before = engine.journal().len();
    let calls_before = engine.coordinator().calls().len();

    for event in [
        BattleEvent::PlayerBeastsMoveStarted,
        BattleEvent::CpuMoveStarted,
        BattleEvent::CpuBeastsMoveStarted,
        BattleEvent::MoveCompleted,
        BattleEvent::TurnCompleted,
    ] {
        engine.dispatch(event).unwrap();
    }

    // Nothing was processed and no hook fired: the machine unsubscribed.
    assert_eq!(engine.journal().len(), journal_before);
    assert_eq!(engine.coordinator().calls().len(), calls_before);
    assert!(!engine.journal().contains(&BattleEvent::CpuMoveCompleted));
}

#[test]
fn test_game_end_notifies_coordinator_once() {
    let mut engine = started_engine();
    engine.end_game().unwrap();
    // A second end is suppressed, not an error and not a second hook call.
    engine.dispatch(BattleEvent::GameEnded).unwrap();

    let ends = engine
        .coordinator()
        .calls()
        .iter()
        .filter(|c| **c == "onGameEnded")
        .count();
    assert_eq!(ends, 1);
}

#[test]
fn test_coordinator_signal_suppresses_quartet_mid_flight() {
    /// Coordinator whose game-ended signal trips as soon as the cpu move
    /// stage starts, while earlier stage events are already in flight
    struct TripwireCoordinator {
        tripped: bool,
    }

    impl BattleCoordinator for TripwireCoordinator {
        fn on_cpu_move_started(&mut self) {
            self.tripped = true;
        }

        fn current_round(&self) -> u32 {
            1
        }

        fn game_ended(&self) -> bool {
            self.tripped
        }
    }

    let mut state = BattleState::new(PartyPair::new(PLAYER_PARTY, CPU_PARTY).unwrap());
    state.logger.set_verbosity(VerbosityLevel::Silent);
    state
        .register_fighter(Fighter::new(FighterId::new(1), "Aldric", PLAYER_PARTY))
        .unwrap();

    let mut engine = TurnEngine::new(state, TripwireCoordinator { tripped: false });
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    // The only mover completes; the quartet starts and trips the signal on
    // cpuMoveStarted, so cpuMoveCompleted (already emitted) is suppressed.
    engine.dispatch(BattleEvent::MoveCompleted).unwrap();

    let names: Vec<_> = engine.journal().iter().map(|e| e.name()).collect();
    assert!(names.contains(&"cpuMoveStarted"));
    assert!(!names.contains(&"cpuMoveCompleted"));
    assert!(!names.contains(&"turnCompleted"));
}

#[test]
fn test_driving_after_end_is_an_error() {
    let mut engine = started_engine();
    engine.end_game().unwrap();

    assert!(engine.run_round().is_err());
    assert!(engine.run_rounds(1).is_ok()); // no-op: loop exits on status
}
