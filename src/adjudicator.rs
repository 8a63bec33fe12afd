//! Resolution of a single throw between two symbols.

use crate::symbol::Symbol;

/// Result of [`adjudicate`], from the point of view of the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The first symbol beats the second.
    FirstWins,
    /// The second symbol beats the first.
    SecondWins,
    /// Both symbols are the same.
    Tie,
}

impl Outcome {
    /// The same outcome seen from the other side.
    pub fn mirrored(self) -> Outcome {
        match self {
            Outcome::FirstWins => Outcome::SecondWins,
            Outcome::SecondWins => Outcome::FirstWins,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// Resolves `a` against `b`.
///
/// Every aggregation rule in [`round_aggregator`](crate::round_aggregator) is built on top of this.
pub fn adjudicate(a: Symbol, b: Symbol) -> Outcome {
    if a == b {
        Outcome::Tie
    } else if a.beats(b) {
        Outcome::FirstWins
    } else {
        Outcome::SecondWins
    }
}
