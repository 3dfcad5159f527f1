//! Battle state machine and orchestration

pub mod coordinator;
pub mod engine;
pub mod events;
pub mod logger;
pub mod phase;
pub mod resolver;
pub mod state;
pub mod turn;

pub use coordinator::{AttackVector, BattleCoordinator, RecordingCoordinator, ScriptedCoordinator};
pub use engine::{EngineStatus, TurnEngine, VerbosityLevel};
pub use events::{BattleEvent, FighterChange};
pub use logger::{BattleLogger, LogEntry, OutputFormat, OutputMode};
pub use phase::{MovePhase, RoundStage};
pub use resolver::{find_next_fighter, CombinedFightersParties};
pub use state::BattleState;
pub use turn::Turn;
