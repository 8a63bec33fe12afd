//! Participants and roster construction.

use std::hash::Hash;

/// Identifier of a participant, stable for the duration of a game.
pub type ParticipantId = u32;

/// A seat in the game.
///
/// `score` is only used by tournament games, `eliminated` only by knockout games.
#[derive(Debug, Clone)]
pub struct Participant {
    /// Stable identifier.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Points accumulated so far.
    pub score: u32,
    /// Lost a knockout round.
    pub eliminated: bool,
    /// Controlled by the computer.
    pub is_automated: bool,
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Participant {
    /// A human-controlled participant.
    pub fn human(id: ParticipantId, name: impl Into<String>) -> Participant {
        Participant {
            id,
            name: name.into(),
            score: 0,
            eliminated: false,
            is_automated: false,
        }
    }

    /// The computer-controlled opponent. Its choices come from an
    /// [`OpponentStrategy`](crate::opponent::OpponentStrategy).
    pub fn automated(id: ParticipantId, name: impl Into<String>) -> Participant {
        Participant {
            is_automated: true,
            ..Participant::human(id, name)
        }
    }

    /// Not eliminated.
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }

    /// Back to the state it had at game start.
    pub(crate) fn clear_progress(&mut self) {
        self.score = 0;
        self.eliminated = false;
    }
}

/// Builds the default roster for a player-count selection: `Player 1` to `Player n`, with ids
/// starting at 0, followed by a `Computer` seat when `with_opponent` is set.
pub fn roster_of(player_count: u32, with_opponent: bool) -> Vec<Participant> {
    let mut roster: Vec<_> = (0..player_count)
        .map(|id| Participant::human(id, format!("Player {}", id + 1)))
        .collect();
    if with_opponent {
        roster.push(Participant::automated(player_count, "Computer"));
    }
    roster
}
