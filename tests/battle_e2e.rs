//! End-to-end battle sequencing tests
//!
//! Drives full games through the public engine API and checks the produced
//! event order against the contract: phase pipeline, round-robin turn
//! changes, the side-stage quartet, and round roll-over.

use beast_arena::core::{Fighter, FighterId, MoveStatus, PartyId, PartyPair, Spell, SpellId};
use beast_arena::game::{
    BattleEvent, BattleState, EngineStatus, RecordingCoordinator, ScriptedCoordinator, TurnEngine,
    VerbosityLevel,
};
use similar_asserts::assert_eq;

const PLAYER_PARTY: PartyId = PartyId::new(1);
const CPU_PARTY: PartyId = PartyId::new(2);

/// Build an engine with `players` player fighters then `cpus` cpu fighters,
/// ids assigned in registration order starting at 1
fn engine_with_roster(
    players: u32,
    cpus: u32,
    coordinator: ScriptedCoordinator,
) -> TurnEngine<RecordingCoordinator<ScriptedCoordinator>> {
    let mut state = BattleState::new(PartyPair::new(PLAYER_PARTY, CPU_PARTY).unwrap());
    state.logger.set_verbosity(VerbosityLevel::Silent);

    let mut id = 1;
    for n in 1..=players {
        state
            .register_fighter(Fighter::new(
                FighterId::new(id),
                format!("Hero {n}"),
                PLAYER_PARTY,
            ))
            .unwrap();
        id += 1;
    }
    for n in 1..=cpus {
        state
            .register_fighter(Fighter::new(
                FighterId::new(id),
                format!("Beast {n}"),
                CPU_PARTY,
            ))
            .unwrap();
        id += 1;
    }

    TurnEngine::new(state, RecordingCoordinator::new(coordinator))
}

fn journal_names<C: beast_arena::game::BattleCoordinator>(
    engine: &TurnEngine<C>,
) -> Vec<&'static str> {
    engine.journal().iter().map(|e| e.name()).collect()
}

#[test]
fn test_game_start_runs_exact_phase_sequence() {
    let mut engine = engine_with_roster(1, 1, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();

    assert_eq!(
        journal_names(&engine),
        vec![
            "gameStarted",
            "turnStarted",
            "moveStarted",
            "phaseBeforeMove",
            "phaseMoving",
        ]
    );
}

#[test]
fn test_quartet_order_is_fixed_regardless_of_roster_shape() {
    for (players, cpus) in [(1, 1), (1, 4), (3, 1), (4, 4)] {
        let mut engine = engine_with_roster(players, cpus, ScriptedCoordinator::new());
        engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
        engine.run_round().unwrap();

        let names = journal_names(&engine);
        let quartet: Vec<_> = names
            .iter()
            .filter(|n| {
                [
                    "playerBeastsMoveStarted",
                    "playerBeastsMoveCompleted",
                    "cpuMoveStarted",
                    "cpuMoveCompleted",
                    "cpuBeastsMoveStarted",
                    "cpuBeastsMoveCompleted",
                    "turnCompleted",
                ]
                .contains(*n)
            })
            .copied()
            .collect();

        assert_eq!(
            quartet,
            vec![
                "playerBeastsMoveStarted",
                "playerBeastsMoveCompleted",
                "cpuMoveStarted",
                "cpuMoveCompleted",
                "cpuBeastsMoveStarted",
                "cpuBeastsMoveCompleted",
                "turnCompleted",
            ],
            "quartet order broke for roster {players}p/{cpus}c"
        );
    }
}

#[test]
fn test_round_robin_visits_every_fighter_once() {
    let mut engine = engine_with_roster(2, 2, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.run_round().unwrap();

    // Each of the four fighters produced exactly one moveCompleted.
    let completed = engine
        .journal()
        .iter()
        .filter(|e| matches!(e, BattleEvent::MoveCompleted))
        .count();
    assert_eq!(completed, 4);

    // Turn changes walked the roster in registration order after the
    // initial player mover.
    let changes: Vec<_> = engine
        .journal()
        .iter()
        .filter_map(|e| match e {
            BattleEvent::TurnChangeNextFighter {
                next_fighter_id, ..
            } => Some(next_fighter_id.as_u32()),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![2, 3, 4]);
}

#[test]
fn test_turn_change_carries_party_of_next_fighter() {
    let mut engine = engine_with_roster(1, 1, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.dispatch(BattleEvent::MoveCompleted).unwrap();

    assert!(engine
        .journal()
        .contains(&BattleEvent::TurnChangeNextFighter {
            next_fighter_id: FighterId::new(2),
            next_party_id: CPU_PARTY,
        }));
}

#[test]
fn test_statuses_reset_to_idle_on_round_start() {
    let mut engine = engine_with_roster(2, 2, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.run_round().unwrap();

    // Round 2 has begun: its first mover is moving, everyone else idle.
    let statuses: Vec<_> = engine
        .state
        .fighters()
        .iter()
        .map(|f| f.move_status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            MoveStatus::Moving,
            MoveStatus::Idle,
            MoveStatus::Idle,
            MoveStatus::Idle,
        ]
    );
}

#[test]
fn test_multi_round_battle_ends_on_schedule() {
    let mut engine = engine_with_roster(2, 2, ScriptedCoordinator::new().with_end_after_round(3));
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.run_rounds(5).unwrap();

    assert_eq!(engine.status(), EngineStatus::Ended);
    assert_eq!(engine.coordinator().inner().round(), 3);

    // Coordinator saw exactly one game start and one game end.
    let calls = engine.coordinator().calls();
    assert_eq!(calls.iter().filter(|c| **c == "onGameStarted").count(), 1);
    assert_eq!(calls.iter().filter(|c| **c == "onGameEnded").count(), 1);
    assert_eq!(calls.iter().filter(|c| **c == "onTurnCompleted").count(), 3);
}

#[test]
fn test_coordinator_hooks_fire_in_stage_order() {
    let mut engine = engine_with_roster(1, 1, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.run_round().unwrap();

    let calls = engine.coordinator().calls();
    let stage_calls: Vec<_> = calls
        .iter()
        .filter(|c| {
            [
                "onPlayerBeastsMoveStarted",
                "onPlayerBeastsMoveCompleted",
                "onCpuMoveStarted",
                "onCpuMoveCompleted",
                "onCpuBeastsMoveStarted",
                "onCpuBeastsMoveCompleted",
                "onTurnCompleted",
            ]
            .contains(*c)
        })
        .copied()
        .collect();
    assert_eq!(
        stage_calls,
        vec![
            "onPlayerBeastsMoveStarted",
            "onPlayerBeastsMoveCompleted",
            "onCpuMoveStarted",
            "onCpuMoveCompleted",
            "onCpuBeastsMoveStarted",
            "onCpuBeastsMoveCompleted",
            "onTurnCompleted",
        ]
    );
}

#[test]
fn test_attack_vectors_pulled_once_per_move() {
    let mut engine = engine_with_roster(2, 1, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.run_round().unwrap();

    // One pull per move declaration: three movers in round one, plus the
    // auto-started first move of round two.
    let pulls = engine
        .coordinator()
        .calls()
        .iter()
        .filter(|c| **c == "calculateAttackVectors")
        .count();
    assert_eq!(pulls, 4);
}

#[test]
fn test_spell_application_forwards_expiration() {
    let mut engine = engine_with_roster(1, 1, ScriptedCoordinator::new());
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();

    engine
        .dispatch(BattleEvent::ApplySpellToFighter {
            spell: Spell::new(SpellId::new(21), "Stone Skin", 2),
        })
        .unwrap();

    let tail: Vec<_> = journal_names(&engine)
        .into_iter()
        .rev()
        .take(2)
        .collect();
    assert_eq!(tail, vec!["reduceSpellExpiration", "applySpellToFighter"]);
}

#[test]
fn test_final_state_serializes() {
    let mut engine = engine_with_roster(1, 1, ScriptedCoordinator::new().with_end_after_round(1));
    engine.start_game(FighterId::new(1), PLAYER_PARTY).unwrap();
    engine.run_rounds(1).unwrap();

    let json = serde_json::to_value(&engine.state).unwrap();
    assert_eq!(json["fighters"].as_array().unwrap().len(), 2);
    assert!(json["turn"].is_object());
}
