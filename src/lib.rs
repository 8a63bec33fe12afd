//! # Round Resolver
//!
//! Scoring and elimination engine for multiplayer rock-paper-scissors.
//!
//! It provides:
//! - The [`Symbol`](crate::symbol::Symbol) domain and its cyclic dominance relation
//! - Pairwise resolution through [`adjudicate`](crate::adjudicator::adjudicate)
//! - Round aggregation for N participants ([`round_aggregator`])
//! - Two meta-game modes: point-accumulation tournaments and knockouts ([`GameMode`](crate::game_mode::GameMode))
//! - A game state machine, [`RoundResolver`](crate::controller::RoundResolver), meant to be
//!   driven by a user interface
//!
//! Every round, each active participant submits one symbol. Once all of them did, the round
//! is resolved at once: in a tournament, everyone scores one point per participant their symbol
//! beats; in a knockout, when exactly two symbols were thrown, the losing side is eliminated.
//!
//! # Documentation Overview
//!
//! - For the game lifecycle and the public operations, see the [`controller`] module.
//! - For scoring rules, see [`round_aggregator`].
//! - For the computer-controlled opponent, see the [`OpponentStrategy`](crate::opponent::OpponentStrategy) trait.
//! - For resolver behaviors (auto-advance, logging), see [`Configuration`](crate::configuration::Configuration).
//!
//! # Usage Example
//!
//! ```
//! use round_resolver::prelude::*;
//!
//! let config = Configuration::new().with_auto_advance(true);
//! let mut resolver = RoundResolver::new(config);
//!
//! // two humans, first to 5 points
//! let roster = roster_of(2, false);
//! resolver.start_game(GameMode::tournament_for(roster.len()), roster)?;
//!
//! for _ in 0..5 {
//!     resolver.submit_choice(0, Symbol::Rock)?;
//!     resolver.submit_choice(1, Symbol::Scissors)?;
//! }
//!
//! let standings = resolver.current_standings();
//! assert_eq!(standings.state, GameState::Complete);
//! assert_eq!(standings.winner().map(|p| p.score), Some(5));
//! # Ok::<(), ResolverError>(())
//! ```
//!
//! ## Playing against the computer
//!
//! ```
//! use round_resolver::prelude::*;
//!
//! let mut resolver = RoundResolver::new(Configuration::new())
//!     .with_opponent(RandomStrategy::with_seed(7));
//! resolver.start_game(GameMode::Knockout, roster_of(1, true))?;
//!
//! // the computer answers right away, so the round is resolved by this call
//! let submission = resolver.submit_choice(0, Symbol::Paper)?;
//! assert!(matches!(submission, Submission::RoundResolved(_)));
//! # Ok::<(), ResolverError>(())
//! ```
#![warn(missing_docs)]

pub mod adjudicator;
pub mod configuration;
pub mod controller;
pub mod error;
pub mod game_mode;
mod logger;
pub mod opponent;
pub mod participant;
pub mod round_aggregator;
pub mod symbol;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use round_resolver::prelude::*;
/// ```
pub mod prelude {
    pub use crate::adjudicator::{adjudicate, Outcome};
    pub use crate::configuration::Configuration;
    pub use crate::controller::{GameOutcome, GameState, RoundResolver, Standings, Submission};
    pub use crate::error::ResolverError;
    pub use crate::game_mode::GameMode;
    pub use crate::opponent::{CounterLastRound, OpponentStrategy, RandomStrategy};
    pub use crate::participant::{roster_of, Participant, ParticipantId};
    pub use crate::round_aggregator::{RoundChoice, RoundResult};
    pub use crate::symbol::Symbol;
}
