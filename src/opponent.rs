//! Choice generation for the automated opponent.
//!
//! The resolver asks its [`OpponentStrategy`] for a symbol right after a human participant
//! submitted, for every automated participant that has not chosen yet. There is no delay: any
//! "thinking time" is up to the presentation layer.

use std::collections::HashMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    participant::ParticipantId,
    round_aggregator::RoundResult,
    symbol::Symbol,
};

/// What an automated participant should implement.
pub trait OpponentStrategy {
    /// Choose a symbol for participant `me`, given every round played so far (oldest first).
    fn choose(&mut self, history: &[RoundResult], me: ParticipantId) -> Symbol;
}

/// Plays the symbol that beats the one the other participants threw most often last round.
///
/// Plays rock on the first round. On equal counts, the earliest symbol of [`Symbol::ALL`] is
/// countered.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterLastRound;

impl OpponentStrategy for CounterLastRound {
    fn choose(&mut self, history: &[RoundResult], me: ParticipantId) -> Symbol {
        let Some(last) = history.last() else {
            return Symbol::Rock;
        };

        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for (id, symbol) in &last.choices {
            if *id != me {
                *counts.entry(*symbol).or_default() += 1;
            }
        }

        let mut most_frequent = None;
        let mut best = 0;
        for symbol in Symbol::ALL {
            let count = counts.get(&symbol).copied().unwrap_or(0);
            if count > best {
                best = count;
                most_frequent = Some(symbol);
            }
        }
        most_frequent.map_or(Symbol::Rock, Symbol::beaten_by)
    }
}

/// Picks uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentStrategy for RandomStrategy {
    fn choose(&mut self, _history: &[RoundResult], _me: ParticipantId) -> Symbol {
        *Symbol::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Symbol::Rock)
    }
}

#[cfg(test)]
mod opponent_tests {
    use std::collections::BTreeSet;

    use super::*;
    use Symbol::*;

    fn round(choices: &[(ParticipantId, Symbol)]) -> RoundResult {
        RoundResult {
            round_number: 1,
            choices: choices.iter().copied().collect(),
            winners: BTreeSet::new(),
            ties: BTreeSet::new(),
            eliminated: BTreeSet::new(),
            score_deltas: Default::default(),
        }
    }

    #[test]
    fn test_counter_first_round() {
        assert_eq!(CounterLastRound.choose(&[], 2), Rock);
    }

    #[test]
    fn test_counter_ignores_own_choice() {
        let history = vec![round(&[(0, Scissors), (1, Scissors), (2, Paper)])];
        // others threw scissors twice
        assert_eq!(CounterLastRound.choose(&history, 2), Rock);
        // others threw scissors and paper once each: paper comes first in Symbol::ALL
        assert_eq!(CounterLastRound.choose(&history, 0), Scissors);
    }

    #[test]
    fn test_counter_uses_last_round_only() {
        let history = vec![round(&[(0, Rock), (1, Paper)]), round(&[(0, Paper), (1, Rock)])];
        assert_eq!(CounterLastRound.choose(&history, 1), Scissors);
    }

    #[test]
    fn test_random_is_reproducible() {
        let mut a = RandomStrategy::with_seed(42);
        let mut b = RandomStrategy::with_seed(42);
        let first: Vec<_> = (0..20).map(|_| a.choose(&[], 0)).collect();
        let second: Vec<_> = (0..20).map(|_| b.choose(&[], 0)).collect();
        assert_eq!(first, second);
    }
}
