//! Error types for the battle core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Unknown fighter: {0}")]
    UnknownFighter(u32),

    #[error("Unknown party: {0}")]
    UnknownParty(u32),

    #[error("Duplicate fighter id: {0}")]
    DuplicateFighter(u32),

    #[error("Duplicate party id: {0}")]
    DuplicateParty(u32),

    #[error("No fighter is mid-move")]
    NoMovingFighter,

    #[error("Game has not started")]
    GameNotStarted,

    #[error("Game already started")]
    GameAlreadyStarted,

    #[error("Game already ended")]
    GameAlreadyEnded,
}

pub type Result<T> = std::result::Result<T, BattleError>;
