//! Rejections returned by the [`RoundResolver`](crate::controller::RoundResolver).
//!
//! None of these is fatal: whenever one is returned the resolver state is left untouched, so a
//! caller only interested in "did it work" can use `.is_ok()`.

use thiserror::Error;

use crate::{controller::GameState, participant::ParticipantId};

/// Why an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// The operation is not legal in the current state.
    #[error("cannot {operation} while the game is {state}")]
    InvalidTransition {
        /// What was attempted.
        operation: &'static str,
        /// State the resolver was in.
        state: GameState,
    },

    /// The participant already chose this round.
    #[error("participant #{0} already chose this round")]
    DuplicateChoice(ParticipantId),

    /// No participant with this id in the roster.
    #[error("no participant #{0} in the roster")]
    UnknownParticipant(ParticipantId),

    /// Eliminated participants cannot choose anymore.
    #[error("participant #{0} has been eliminated")]
    EliminatedParticipant(ParticipantId),

    /// The roster given to `start_game` cannot be played.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// The game mode given to `start_game` cannot be played.
    #[error("invalid game mode: {0}")]
    InvalidMode(String),
}
