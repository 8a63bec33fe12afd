//! Meta-game modes.
//!
//! A game is played either as a [`GameMode::Tournament`], where every round awards points and
//! the first to reach a threshold wins, or as a [`GameMode::Knockout`], where losers are
//! eliminated until one participant is left.

/// Points needed to win a two-party tournament.
pub const TWO_PARTY_THRESHOLD: u32 = 5;
/// Points needed to win a tournament with three or more participants.
pub const MULTI_PARTY_THRESHOLD: u32 = 10;
/// Round cap applied by [`GameMode::tournament_for`].
pub const DEFAULT_MAX_ROUNDS: u32 = 50;

/// How rounds are scored and when the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Each participant scores one point per other participant their symbol beats.
    ///
    /// Ends when a score reaches `threshold` or after `max_rounds` rounds.
    Tournament {
        /// Score that ends the game.
        threshold: u32,
        /// Number of rounds after which the game ends regardless of scores.
        max_rounds: u32,
    },
    /// Participants whose symbol lost are eliminated. Ends when one participant remains.
    Knockout,
}

impl GameMode {
    /// Tournament with the default threshold for `player_count` participants and the default
    /// round cap.
    pub fn tournament_for(player_count: usize) -> GameMode {
        let threshold = if player_count <= 2 {
            TWO_PARTY_THRESHOLD
        } else {
            MULTI_PARTY_THRESHOLD
        };
        GameMode::Tournament {
            threshold,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// True for [`GameMode::Knockout`].
    pub fn is_knockout(&self) -> bool {
        matches!(self, GameMode::Knockout)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Tournament {
                threshold,
                max_rounds,
            } => write!(f, "tournament (first to {threshold}, max {max_rounds} rounds)"),
            GameMode::Knockout => write!(f, "knockout"),
        }
    }
}
