//! Turns one round of simultaneous choices into a [`RoundResult`] and a [`RoundDelta`].
//!
//! The aggregator is a pure function: it reads a roster snapshot and the round's choices and
//! returns what happened, without touching the roster. The
//! [`RoundResolver`](crate::controller::RoundResolver) applies the delta.
//!
//! # Tournament rounds
//! Every active participant scores one point per *other* active participant their symbol
//! beats. A participant is a round winner if they scored at least one point.
//!
//! # Knockout rounds
//! Participants are grouped by symbol. With exactly two distinct symbols, the losing group is
//! eliminated and the winning group are the round winners. With one or three distinct symbols
//! the round is a full tie: with all three symbols present dominance is cyclic and no group
//! can be declared the winner.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::{
    adjudicator::{adjudicate, Outcome},
    game_mode::GameMode,
    participant::{Participant, ParticipantId},
    symbol::Symbol,
};

/// Choices made during one round, keyed by participant id.
pub type RoundChoice = BTreeMap<ParticipantId, Symbol>;

/// Everything that happened during one round. Never modified once recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// 1-based.
    pub round_number: u32,
    /// Choices of the active participants.
    pub choices: RoundChoice,
    /// Participants who won at least one throw (tournament) or survived (knockout).
    pub winners: BTreeSet<ParticipantId>,
    /// Tournament: participants that neither scored nor lost to anybody.
    /// Knockout: everyone, when the round is a full tie.
    pub ties: BTreeSet<ParticipantId>,
    /// Knockout only.
    pub eliminated: BTreeSet<ParticipantId>,
    /// Tournament only. Contains every active participant, including those who scored 0.
    pub score_deltas: BTreeMap<ParticipantId, u32>,
}

impl RoundResult {
    /// No winner this round.
    pub fn is_full_tie(&self) -> bool {
        self.winners.is_empty()
    }

    /// Sum of all points awarded this round.
    pub fn points_awarded(&self) -> u32 {
        self.score_deltas.values().sum()
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let choices = self
            .choices
            .iter()
            .map(|(id, symbol)| format!("#{id}:{symbol}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "round {} [{choices}]", self.round_number)?;
        if self.is_full_tie() {
            write!(f, " tie")
        } else {
            write!(f, " winners: {:?}", self.winners)?;
            if !self.eliminated.is_empty() {
                write!(f, ", eliminated: {:?}", self.eliminated)?;
            }
            Ok(())
        }
    }
}

/// Roster changes produced by one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundDelta {
    /// Points to add, per participant.
    Scores(BTreeMap<ParticipantId, u32>),
    /// Participants to flag as eliminated.
    Eliminations(BTreeSet<ParticipantId>),
}

impl RoundDelta {
    /// Applies the delta to the roster. Ids absent from the roster are ignored.
    pub fn apply(&self, roster: &mut [Participant]) {
        match self {
            RoundDelta::Scores(deltas) => {
                for participant in roster.iter_mut() {
                    if let Some(points) = deltas.get(&participant.id) {
                        participant.score += points;
                    }
                }
            }
            RoundDelta::Eliminations(ids) => {
                for participant in roster.iter_mut() {
                    if ids.contains(&participant.id) {
                        participant.eliminated = true;
                    }
                }
            }
        }
    }
}

/// Resolves one round.
///
/// Only active participants of `roster` take part. Every one of them is expected to have an
/// entry in `choices`; this is not checked (participants without a choice are skipped).
pub fn aggregate(
    mode: &GameMode,
    round_number: u32,
    roster: &[Participant],
    choices: &RoundChoice,
) -> (RoundResult, RoundDelta) {
    let entries: Vec<(ParticipantId, Symbol)> = roster
        .iter()
        .filter(|p| p.is_active())
        .filter_map(|p| choices.get(&p.id).map(|symbol| (p.id, *symbol)))
        .collect();
    debug_assert_eq!(
        entries.len(),
        roster.iter().filter(|p| p.is_active()).count(),
        "aggregate called before every active participant chose"
    );

    let mut result = RoundResult {
        round_number,
        choices: entries.iter().copied().collect(),
        winners: BTreeSet::new(),
        ties: BTreeSet::new(),
        eliminated: BTreeSet::new(),
        score_deltas: BTreeMap::new(),
    };

    let delta = match mode {
        GameMode::Tournament { .. } => score_tournament_round(&entries, &mut result),
        GameMode::Knockout => resolve_knockout_round(&entries, &mut result),
    };
    debug!("{result}");
    (result, delta)
}

fn score_tournament_round(
    entries: &[(ParticipantId, Symbol)],
    result: &mut RoundResult,
) -> RoundDelta {
    for (id, symbol) in entries {
        let mut wins = 0;
        let mut losses = 0;
        for (other_id, other_symbol) in entries {
            if other_id == id {
                continue;
            }
            match adjudicate(*symbol, *other_symbol) {
                Outcome::FirstWins => wins += 1,
                Outcome::SecondWins => losses += 1,
                Outcome::Tie => {}
            }
        }
        trace!("#{id} ({symbol}): {wins} wins, {losses} losses");

        result.score_deltas.insert(*id, wins);
        if wins > 0 {
            result.winners.insert(*id);
        } else if losses == 0 {
            result.ties.insert(*id);
        }
    }
    RoundDelta::Scores(result.score_deltas.clone())
}

fn resolve_knockout_round(
    entries: &[(ParticipantId, Symbol)],
    result: &mut RoundResult,
) -> RoundDelta {
    let mut groups: HashMap<Symbol, Vec<ParticipantId>> = HashMap::with_capacity(3);
    for (id, symbol) in entries {
        groups.entry(*symbol).or_default().push(*id);
    }

    // Symbol::ALL gives a deterministic order for the groups
    let present: Vec<_> = Symbol::ALL
        .into_iter()
        .filter(|s| groups.contains_key(s))
        .collect();
    let [first, second] = present[..] else {
        // one symbol: nobody lost. three symbols: no group beats both others.
        trace!("{} distinct symbols, full tie", present.len());
        result.ties = entries.iter().map(|(id, _)| *id).collect();
        return RoundDelta::Eliminations(BTreeSet::new());
    };
    let (winning, losing) = match adjudicate(first, second) {
        Outcome::FirstWins => (first, second),
        _ => (second, first),
    };
    trace!("{winning} beats {losing}");

    result.winners = groups[&winning].iter().copied().collect();
    result.eliminated = groups[&losing].iter().copied().collect();
    RoundDelta::Eliminations(result.eliminated.clone())
}

#[cfg(test)]
mod round_aggregator_tests {
    use super::*;
    use crate::participant::roster_of;
    use Symbol::*;

    fn choices(symbols: &[Symbol]) -> RoundChoice {
        symbols
            .iter()
            .enumerate()
            .map(|(id, s)| (id as ParticipantId, *s))
            .collect()
    }

    fn tournament() -> GameMode {
        GameMode::tournament_for(4)
    }

    #[test]
    fn test_tournament_one_vs_one() {
        let roster = roster_of(2, false);
        let (result, delta) = aggregate(&tournament(), 1, &roster, &choices(&[Rock, Scissors]));
        assert_eq!(result.winners, BTreeSet::from([0]));
        assert!(result.ties.is_empty());
        assert_eq!(delta, RoundDelta::Scores(BTreeMap::from([(0, 1), (1, 0)])));
    }

    #[test]
    fn test_tournament_points_equal_winning_pairs() {
        let roster = roster_of(4, false);
        let round = choices(&[Rock, Rock, Scissors, Paper]);
        let (result, _) = aggregate(&tournament(), 1, &roster, &round);

        let mut winning_pairs = 0;
        for (a, sa) in &round {
            for (b, sb) in &round {
                if a != b && adjudicate(*sa, *sb) == Outcome::FirstWins {
                    winning_pairs += 1;
                }
            }
        }
        assert_eq!(result.points_awarded(), winning_pairs);
        // rock beats scissors twice, scissors beats paper, paper beats both rocks
        assert_eq!(
            result.score_deltas,
            BTreeMap::from([(0, 1), (1, 1), (2, 1), (3, 2)])
        );
        assert_eq!(result.winners.len(), 4);
    }

    #[test]
    fn test_tournament_all_same_is_tie() {
        let roster = roster_of(3, false);
        let (result, delta) = aggregate(&tournament(), 2, &roster, &choices(&[Paper; 3]));
        assert!(result.is_full_tie());
        assert_eq!(result.ties.len(), 3);
        assert_eq!(result.points_awarded(), 0);
        assert!(matches!(delta, RoundDelta::Scores(_)));
    }

    #[test]
    fn test_tournament_loser_is_not_a_tie() {
        let roster = roster_of(3, false);
        let (result, _) = aggregate(&tournament(), 1, &roster, &choices(&[Rock, Rock, Paper]));
        assert_eq!(result.winners, BTreeSet::from([2]));
        assert!(result.ties.is_empty());
    }

    #[test]
    fn test_knockout_two_symbols() {
        let roster = roster_of(4, false);
        let (result, delta) = aggregate(
            &GameMode::Knockout,
            2,
            &roster,
            &choices(&[Rock, Paper, Rock, Paper]),
        );
        assert_eq!(result.winners, BTreeSet::from([1, 3]));
        assert_eq!(result.eliminated, BTreeSet::from([0, 2]));
        assert_eq!(delta, RoundDelta::Eliminations(BTreeSet::from([0, 2])));
        assert!(result.score_deltas.is_empty());
    }

    #[test]
    fn test_knockout_three_symbols_is_full_tie() {
        let roster = roster_of(4, false);
        let (result, delta) = aggregate(
            &GameMode::Knockout,
            1,
            &roster,
            &choices(&[Rock, Rock, Paper, Scissors]),
        );
        assert!(result.is_full_tie());
        assert!(result.eliminated.is_empty());
        assert_eq!(result.ties.len(), 4);
        assert_eq!(delta, RoundDelta::Eliminations(BTreeSet::new()));
    }

    #[test]
    fn test_knockout_single_symbol_is_full_tie() {
        let roster = roster_of(3, false);
        let (result, _) = aggregate(&GameMode::Knockout, 1, &roster, &choices(&[Scissors; 3]));
        assert!(result.is_full_tie());
        assert!(result.eliminated.is_empty());
    }

    #[test]
    fn test_eliminated_participants_are_skipped() {
        let mut roster = roster_of(3, false);
        roster[0].eliminated = true;
        let round = RoundChoice::from([(1, Rock), (2, Scissors)]);
        let (result, delta) = aggregate(&GameMode::Knockout, 3, &roster, &round);
        assert_eq!(result.choices.len(), 2);
        assert_eq!(result.winners, BTreeSet::from([1]));

        delta.apply(&mut roster);
        let active: Vec<_> = roster.iter().filter(|p| p.is_active()).map(|p| p.id).collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn test_apply_scores() {
        let mut roster = roster_of(2, false);
        roster[1].score = 3;
        RoundDelta::Scores(BTreeMap::from([(0, 2), (1, 1), (9, 5)])).apply(&mut roster);
        assert_eq!((roster[0].score, roster[1].score), (2, 4));
    }
}
