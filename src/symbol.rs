//! The three throwable symbols and their cyclic dominance relation.
//!
//! rock beats scissors, scissors beats paper, paper beats rock. There is no
//! ranking between symbols, which is why [`Symbol`] does not implement `Ord`.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A throwable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl Symbol {
    /// Every symbol, in a fixed order.
    pub const ALL: [Symbol; 3] = [Symbol::Rock, Symbol::Paper, Symbol::Scissors];

    /// True if `self` beats `other`.
    pub fn beats(self, other: Symbol) -> bool {
        self.beats_symbol() == other
    }

    /// The symbol `self` beats.
    pub fn beats_symbol(self) -> Symbol {
        match self {
            Symbol::Rock => Symbol::Scissors,
            Symbol::Scissors => Symbol::Paper,
            Symbol::Paper => Symbol::Rock,
        }
    }

    /// The symbol that beats `self`.
    pub fn beaten_by(self) -> Symbol {
        match self {
            Symbol::Rock => Symbol::Paper,
            Symbol::Paper => Symbol::Scissors,
            Symbol::Scissors => Symbol::Rock,
        }
    }
}

/// Free-function form of [`Symbol::beats`].
pub fn beats(a: Symbol, b: Symbol) -> bool {
    a.beats(b)
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symbol::Rock => "rock",
            Symbol::Paper => "paper",
            Symbol::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

/// Returned when a string does not name a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not one of rock, paper or scissors")]
pub struct ParseSymbolError(pub String);

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Symbol::Rock),
            "paper" | "p" => Ok(Symbol::Paper),
            "scissors" | "s" => Ok(Symbol::Scissors),
            _ => Err(ParseSymbolError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod symbol_tests {
    use super::*;

    #[test]
    fn test_cycle() {
        assert!(beats(Symbol::Rock, Symbol::Scissors));
        assert!(beats(Symbol::Scissors, Symbol::Paper));
        assert!(beats(Symbol::Paper, Symbol::Rock));
    }

    #[test]
    fn test_nothing_beats_itself() {
        for s in Symbol::ALL {
            assert!(!s.beats(s));
        }
    }

    #[test]
    fn test_exactly_one_direction() {
        for a in Symbol::ALL {
            for b in Symbol::ALL {
                if a != b {
                    assert_ne!(a.beats(b), b.beats(a), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_beaten_by_is_inverse() {
        for s in Symbol::ALL {
            assert!(s.beaten_by().beats(s));
            assert_eq!(s.beats_symbol().beaten_by(), s);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("rock".parse(), Ok(Symbol::Rock));
        assert_eq!(" Paper\n".parse(), Ok(Symbol::Paper));
        assert_eq!("S".parse(), Ok(Symbol::Scissors));
        assert!("lizard".parse::<Symbol>().is_err());
        for s in Symbol::ALL {
            assert_eq!(s.to_string().parse(), Ok(s));
        }
    }
}
