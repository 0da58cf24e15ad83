//! Error types for controller, session and configuration misuse
//!
//! Nothing here is fatal. Callers get a typed signal and the state they
//! called into is left untouched.

use thiserror::Error;

use crate::games::GameId;
use crate::round::RoundPhase;

/// Round controller misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The operation is not valid in the current phase
    #[error("cannot {action} while the round is in the {phase:?} phase")]
    WrongPhase {
        action: &'static str,
        phase: RoundPhase,
    },

    /// The round already emitted its result
    #[error("round already completed")]
    Finished,
}

/// Session orchestrator misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A round result arrived after the session completed
    #[error("session already completed")]
    Completed,

    /// A round result does not belong to the game currently being played
    #[error("result for {got:?} does not match the current game {expected:?}")]
    UnexpectedGame { expected: GameId, got: GameId },

    /// A round result comes from a round other than the one handed out last
    #[error("result for round {got} does not match the current round {expected}")]
    UnexpectedRound { expected: usize, got: usize },
}

/// Settings loading/saving errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
