use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HintDirection {
    TooLow,
    TooHigh,
}

/// Reasons a guess bounces back without consuming an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessRejection {
    NotANumber,
    OutOfRange { min: u32, max: u32 },
    AlreadyTried,
    RoundClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessOutcome {
    Rejected(GuessRejection),
    Hint {
        direction: HintDirection,
        remaining: u32,
    },
    Won {
        secret: u32,
        next_level: u32,
    },
    LifeLost {
        secret: u32,
        lives_left: u32,
    },
    GameOver {
        secret: u32,
    },
    FinalVictory {
        secret: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RunPhase {
    Playing,   // Accepting guesses for the current level
    LifeLost,  // Waiting for the player to resume the level
    GameOver,  // Run ended, waiting for an explicit restart
    FinalVictory, // Last level cleared, terminal
}
