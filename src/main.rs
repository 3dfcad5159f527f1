//! Beast Arena - Main Binary
//!
//! Drives a demo battle between a player party and a cpu party with a
//! scripted coordinator, printing the phase transitions as they happen.

use anyhow::Context;
use beast_arena::{
    core::{Fighter, FighterId, PartyId, PartyPair},
    game::{
        BattleState, EngineStatus, OutputFormat, ScriptedCoordinator, TurnEngine, VerbosityLevel,
    },
};
use clap::Parser;

/// Verbosity level for battle output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Beast Arena - turn-based battle core demo", long_about = None)]
struct Cli {
    /// Number of fighters in the player party
    #[arg(long, default_value_t = 2)]
    player_fighters: u32,

    /// Number of fighters in the cpu party
    #[arg(long, default_value_t = 2)]
    cpu_fighters: u32,

    /// Number of rounds to run before the coordinator ends the game
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Verbosity level for battle output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityArg,

    /// Emit log lines as JSON objects instead of text
    #[arg(long)]
    json: bool,

    /// Print the final battle state as JSON after the game ends
    #[arg(long)]
    dump_state: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.player_fighters == 0 {
        anyhow::bail!("at least one player fighter is required to start a game");
    }

    let player_party = PartyId::new(1);
    let cpu_party = PartyId::new(2);
    let parties = PartyPair::new(player_party, cpu_party)?;

    let mut state = BattleState::new(parties);
    state.logger.set_verbosity(cli.verbosity.0);
    if cli.json {
        state.logger.set_output_format(OutputFormat::Json);
    }

    let mut next_id = 0u32;
    for n in 1..=cli.player_fighters {
        let id = FighterId::new(next_id);
        next_id += 1;
        state.register_fighter(Fighter::new(id, format!("Hero {n}"), player_party))?;
    }
    for n in 1..=cli.cpu_fighters {
        let id = FighterId::new(next_id);
        next_id += 1;
        state.register_fighter(Fighter::new(id, format!("Beast {n}"), cpu_party))?;
    }

    let coordinator = ScriptedCoordinator::new().with_end_after_round(cli.rounds);
    let mut engine = TurnEngine::new(state, coordinator);

    engine
        .start_game(FighterId::new(0), player_party)
        .context("failed to start game")?;
    engine
        .run_rounds(cli.rounds)
        .context("battle stopped on a precondition violation")?;

    if engine.status() != EngineStatus::Ended {
        engine.end_game()?;
    }

    if cli.verbosity.0 >= VerbosityLevel::Minimal {
        println!(
            "rounds completed: {}, events processed: {}",
            engine.coordinator().round(),
            engine.journal().len()
        );
    }

    if cli.dump_state {
        println!("{}", serde_json::to_string_pretty(&engine.state)?);
    }

    Ok(())
}
