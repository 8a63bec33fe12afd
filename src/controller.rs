//! The game state machine.
//!
//! [`RoundResolver`] owns the roster and the round history of a single game and moves through
//! the following states:
//!
//! ```text
//! Setup -> InProgress -> RoundReveal -> InProgress | Complete
//! ```
//!
//! - `Setup`: no game running.
//! - `InProgress`: choices are accepted. As soon as every active participant chose, the round is
//!   aggregated, recorded, and the resolver enters `RoundReveal`.
//! - `RoundReveal`: the result of the last round is on display. [`RoundResolver::advance`] moves
//!   on, to `Complete` if the round ended the game. With
//!   [`Configuration::with_auto_advance`] this happens immediately.
//! - `Complete`: the outcome is fixed. Only [`RoundResolver::start_game`] leaves this state.
//!
//! [`RoundResolver::reset`] goes back to `Setup` from any state except `Complete`.
//!
//! No operation panics on bad input: rejected calls return a [`ResolverError`] and leave the
//! resolver untouched.

use std::{
    collections::{BTreeSet, HashSet},
    fmt, mem,
};

use tracing::{debug, info, instrument, trace, warn};

use crate::{
    configuration::Configuration,
    error::ResolverError,
    game_mode::GameMode,
    logger::init_logger,
    opponent::{CounterLastRound, OpponentStrategy},
    participant::{Participant, ParticipantId},
    round_aggregator::{aggregate, RoundChoice, RoundResult},
    symbol::Symbol,
};

/// Observable state of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// No game running.
    Setup,
    /// Waiting for choices.
    InProgress,
    /// Showing the result of the last round.
    RoundReveal,
    /// Game over.
    Complete,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Setup => "in setup",
            GameState::InProgress => "in progress",
            GameState::RoundReveal => "revealing a round",
            GameState::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// Single winner.
    Winner(ParticipantId),
    /// Several participants finished a tournament with the same best score in the same round.
    Draw(BTreeSet<ParticipantId>),
}

/// Answer to an accepted [`RoundResolver::submit_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Choice stored, still waiting for other participants.
    Recorded,
    /// That choice completed the round.
    RoundResolved(RoundResult),
}

struct Game {
    mode: GameMode,
    roster: Vec<Participant>,
    history: Vec<RoundResult>,
    round_number: u32,
}

impl Game {
    fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    fn active(&self) -> impl Iterator<Item = &Participant> {
        self.roster.iter().filter(|p| p.is_active())
    }

    fn play_round(&mut self, choices: &RoundChoice) -> (RoundResult, Option<GameOutcome>) {
        let (result, delta) = aggregate(&self.mode, self.round_number, &self.roster, choices);
        delta.apply(&mut self.roster);
        let ending = self.check_ending();
        self.history.push(result.clone());
        (result, ending)
    }

    /// Must run right after scoring: in a tournament, anybody at or above the threshold reached
    /// it this round, otherwise the game would already be over.
    fn check_ending(&self) -> Option<GameOutcome> {
        match self.mode {
            GameMode::Knockout => {
                let mut active = self.active();
                match (active.next(), active.next()) {
                    (Some(last), None) => Some(GameOutcome::Winner(last.id)),
                    _ => None,
                }
            }
            GameMode::Tournament {
                threshold,
                max_rounds,
            } => {
                let crossed: Vec<_> = self.active().filter(|p| p.score >= threshold).collect();
                if !crossed.is_empty() {
                    Some(best_of(&crossed))
                } else if self.round_number >= max_rounds {
                    let everyone: Vec<_> = self.active().collect();
                    Some(best_of(&everyone))
                } else {
                    None
                }
            }
        }
    }
}

fn best_of(candidates: &[&Participant]) -> GameOutcome {
    let best = candidates.iter().map(|p| p.score).max().unwrap_or(0);
    let leaders: BTreeSet<_> = candidates
        .iter()
        .filter(|p| p.score == best)
        .map(|p| p.id)
        .collect();
    match leaders.first() {
        Some(id) if leaders.len() == 1 => GameOutcome::Winner(*id),
        _ => GameOutcome::Draw(leaders),
    }
}

enum Phase {
    Setup,
    InProgress {
        game: Game,
        choices: RoundChoice,
    },
    RoundReveal {
        game: Game,
        ending: Option<GameOutcome>,
    },
    Complete {
        game: Game,
        outcome: GameOutcome,
    },
}

/// Read-only view of a game, returned by [`RoundResolver::current_standings`].
#[derive(Debug, Clone, Copy)]
pub struct Standings<'a> {
    /// State of the resolver.
    pub state: GameState,
    /// `None` in setup.
    pub mode: Option<GameMode>,
    /// Round being played or revealed. 0 in setup.
    pub round_number: u32,
    /// Roster, in the order given to `start_game`.
    pub participants: &'a [Participant],
    /// Rounds played, oldest first.
    pub history: &'a [RoundResult],
    /// Only set once the game is complete.
    pub outcome: Option<&'a GameOutcome>,
}

impl<'a> Standings<'a> {
    /// Participants ordered by standing: active first, then by score (highest first), then by id.
    pub fn ranking(&self) -> Vec<&'a Participant> {
        let mut ranking: Vec<_> = self.participants.iter().collect();
        ranking.sort_by(|a, b| {
            a.eliminated
                .cmp(&b.eliminated)
                .then(b.score.cmp(&a.score))
                .then(a.id.cmp(&b.id))
        });
        ranking
    }

    /// The winner of a complete game, if it was not a draw.
    pub fn winner(&self) -> Option<&'a Participant> {
        match self.outcome? {
            GameOutcome::Winner(id) => self.participants.iter().find(|p| p.id == *id),
            GameOutcome::Draw(_) => None,
        }
    }
}

/// Owns one game at a time and drives it round by round.
pub struct RoundResolver {
    config: Configuration,
    opponent: Box<dyn OpponentStrategy>,
    phase: Phase,
}

impl RoundResolver {
    #[instrument(skip_all)]
    /// Create a resolver in setup, using [`CounterLastRound`] for the automated opponent.
    pub fn new(config: Configuration) -> RoundResolver {
        if config.log {
            if let Err(err) = init_logger() {
                eprintln!("logging disabled: {err:#}");
            }
        }
        trace!(?config);

        RoundResolver {
            config,
            opponent: Box::new(CounterLastRound),
            phase: Phase::Setup,
        }
    }

    /// Replace the strategy used for automated participants.
    pub fn with_opponent(mut self, opponent: impl OpponentStrategy + 'static) -> RoundResolver {
        self.opponent = Box::new(opponent);
        self
    }

    /// Configuration given at creation.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> GameState {
        match self.phase {
            Phase::Setup => GameState::Setup,
            Phase::InProgress { .. } => GameState::InProgress,
            Phase::RoundReveal { .. } => GameState::RoundReveal,
            Phase::Complete { .. } => GameState::Complete,
        }
    }

    fn game(&self) -> Option<&Game> {
        match &self.phase {
            Phase::Setup => None,
            Phase::InProgress { game, .. }
            | Phase::RoundReveal { game, .. }
            | Phase::Complete { game, .. } => Some(game),
        }
    }

    /// Starts a new game, discarding the previous one if it was complete.
    ///
    /// # Errors
    /// - [`ResolverError::InvalidTransition`] if a game is running (use [`reset`](Self::reset)
    ///   first).
    /// - [`ResolverError::InvalidRoster`] with fewer than two participants, duplicated ids, or
    ///   more than one automated participant.
    /// - [`ResolverError::InvalidMode`] for a tournament with a zero threshold or round cap.
    pub fn start_game(
        &mut self,
        mode: GameMode,
        roster: Vec<Participant>,
    ) -> Result<(), ResolverError> {
        let state = self.state();
        if !matches!(state, GameState::Setup | GameState::Complete) {
            return Err(invalid("start a game", state));
        }
        check_roster(&roster)?;
        if let GameMode::Tournament {
            threshold,
            max_rounds,
        } = mode
        {
            if threshold == 0 || max_rounds == 0 {
                return Err(ResolverError::InvalidMode(format!(
                    "threshold ({threshold}) and round cap ({max_rounds}) must be positive"
                )));
            }
        }

        let mut roster = roster;
        roster.iter_mut().for_each(Participant::clear_progress);
        info!("starting {mode} with {} participants", roster.len());

        self.phase = Phase::InProgress {
            game: Game {
                mode,
                roster,
                history: vec![],
                round_number: 1,
            },
            choices: RoundChoice::new(),
        };
        Ok(())
    }

    /// Records the choice of participant `id` for the current round.
    ///
    /// After a human participant's choice, automated participants that did not choose yet
    /// receive one from the opponent strategy. When the round is complete it is resolved at
    /// once and the resolver enters [`GameState::RoundReveal`].
    ///
    /// # Errors
    /// [`ResolverError::InvalidTransition`], [`ResolverError::UnknownParticipant`],
    /// [`ResolverError::EliminatedParticipant`] or [`ResolverError::DuplicateChoice`]. The
    /// resolver is unchanged in all cases.
    pub fn submit_choice(
        &mut self,
        id: ParticipantId,
        symbol: Symbol,
    ) -> Result<Submission, ResolverError> {
        let state = self.state();
        let Phase::InProgress { game, choices } = &mut self.phase else {
            debug!("choice of #{id} ignored: game is {state}");
            return Err(invalid("submit a choice", state));
        };

        let Some(participant) = game.participant(id) else {
            warn!("choice submitted for unknown participant #{id}");
            return Err(ResolverError::UnknownParticipant(id));
        };
        if participant.eliminated {
            debug!("choice of eliminated #{id} ignored");
            return Err(ResolverError::EliminatedParticipant(id));
        }
        if choices.contains_key(&id) {
            debug!("second choice of #{id} ignored");
            return Err(ResolverError::DuplicateChoice(id));
        }

        choices.insert(id, symbol);
        trace!("#{id} chose {symbol}");

        if !participant.is_automated {
            let waiting: Vec<_> = game
                .active()
                .filter(|p| p.is_automated && !choices.contains_key(&p.id))
                .map(|p| p.id)
                .collect();
            for automated in waiting {
                let symbol = self.opponent.choose(&game.history, automated);
                trace!("#{automated} (automated) chose {symbol}");
                choices.insert(automated, symbol);
            }
        }

        if !game.active().all(|p| choices.contains_key(&p.id)) {
            return Ok(Submission::Recorded);
        }

        let choices = mem::take(choices);
        let (result, ending) = game.play_round(&choices);
        info!("{result}");
        if self.config.verbose {
            print_round_result(&result, ending.as_ref());
        }

        self.phase = match mem::replace(&mut self.phase, Phase::Setup) {
            Phase::InProgress { game, .. } => Phase::RoundReveal { game, ending },
            other => other,
        };
        if self.config.auto_advance {
            self.advance()?;
        }
        Ok(Submission::RoundResolved(result))
    }

    /// Leaves the reveal of the last round: to [`GameState::Complete`] if that round ended the
    /// game, to the next round otherwise. Returns the new state.
    ///
    /// # Errors
    /// [`ResolverError::InvalidTransition`] outside of [`GameState::RoundReveal`].
    pub fn advance(&mut self) -> Result<GameState, ResolverError> {
        let state = self.state();
        self.phase = match mem::replace(&mut self.phase, Phase::Setup) {
            Phase::RoundReveal {
                game,
                ending: Some(outcome),
            } => {
                info!(?outcome, "game over after {} rounds", game.round_number);
                Phase::Complete { game, outcome }
            }
            Phase::RoundReveal {
                mut game,
                ending: None,
            } => {
                game.round_number += 1;
                debug!("round {}", game.round_number);
                Phase::InProgress {
                    game,
                    choices: RoundChoice::new(),
                }
            }
            other => {
                self.phase = other;
                return Err(invalid("advance", state));
            }
        };
        Ok(self.state())
    }

    /// Discards the running game and goes back to setup.
    ///
    /// # Errors
    /// [`ResolverError::InvalidTransition`] once the game is complete.
    pub fn reset(&mut self) -> Result<(), ResolverError> {
        let state = self.state();
        if state == GameState::Complete {
            return Err(invalid("reset", state));
        }
        info!("reset from {state}");
        self.phase = Phase::Setup;
        Ok(())
    }

    /// Roster, history and outcome of the current game.
    pub fn current_standings(&self) -> Standings<'_> {
        let outcome = match &self.phase {
            Phase::Complete { outcome, .. } => Some(outcome),
            _ => None,
        };
        match self.game() {
            Some(game) => Standings {
                state: self.state(),
                mode: Some(game.mode),
                round_number: game.round_number,
                participants: &game.roster,
                history: &game.history,
                outcome,
            },
            None => Standings {
                state: GameState::Setup,
                mode: None,
                round_number: 0,
                participants: &[],
                history: &[],
                outcome: None,
            },
        }
    }

    /// Rounds played in the current game, oldest first.
    pub fn history(&self) -> &[RoundResult] {
        self.game().map_or(&[], |game| &game.history)
    }

    /// Outcome of a complete game.
    pub fn outcome(&self) -> Option<&GameOutcome> {
        match &self.phase {
            Phase::Complete { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Choices already made this round. `None` outside of [`GameState::InProgress`].
    pub fn pending_choices(&self) -> Option<&RoundChoice> {
        match &self.phase {
            Phase::InProgress { choices, .. } => Some(choices),
            _ => None,
        }
    }
}

impl Default for RoundResolver {
    fn default() -> Self {
        Self::new(Configuration::new())
    }
}

fn invalid(operation: &'static str, state: GameState) -> ResolverError {
    ResolverError::InvalidTransition { operation, state }
}

fn check_roster(roster: &[Participant]) -> Result<(), ResolverError> {
    if roster.len() < 2 {
        return Err(ResolverError::InvalidRoster(format!(
            "at least two participants are needed, got {}",
            roster.len()
        )));
    }
    let mut ids = HashSet::with_capacity(roster.len());
    for participant in roster {
        if !ids.insert(participant.id) {
            return Err(ResolverError::InvalidRoster(format!(
                "id {} is used twice",
                participant.id
            )));
        }
    }
    if roster.iter().filter(|p| p.is_automated).count() > 1 {
        return Err(ResolverError::InvalidRoster(
            "only one automated participant is allowed".to_owned(),
        ));
    }
    Ok(())
}

fn print_round_result(result: &RoundResult, ending: Option<&GameOutcome>) {
    // clear line, green round, default, red game end
    let ending = match ending {
        Some(GameOutcome::Winner(id)) => format!(" \x1b[31mwinner: #{id}\x1b[39m"),
        Some(GameOutcome::Draw(ids)) => format!(" \x1b[31mdraw between {ids:?}\x1b[39m"),
        None => String::new(),
    };
    println!("\x1b[2K\x1b[32m{result}\x1b[39m{ending}");
}
