//! Participants and turn order.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A participant's mutable race state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    name: String,
    /// 1-based turn order.
    ordinal: usize,
    /// Current cell index.
    position: usize,
    /// Idle turns still owed.
    wait_turns: u32,
    /// Extra turns earned and not yet played.
    bonus_turns: u32,
}

impl Player {
    /// Creates a player on the start cell.
    pub fn new(name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            ordinal,
            position: 0,
            wait_turns: 0,
            bonus_turns: 0,
        }
    }

    /// Returns true if the player rolls this turn.
    pub fn can_move(&self) -> bool {
        self.wait_turns == 0
    }

    /// Spends one idle turn.
    pub(crate) fn decrease_wait(&mut self) {
        self.wait_turns = self.wait_turns.saturating_sub(1);
    }

    pub(crate) fn set_position(&mut self, index: usize) {
        self.position = index;
    }

    pub(crate) fn set_wait_turns(&mut self, turns: u32) {
        self.wait_turns = turns;
    }

    pub(crate) fn grant_bonus_turn(&mut self) {
        self.bonus_turns += 1;
    }

    /// Takes every bonus turn owed so far.
    pub(crate) fn take_bonus_turns(&mut self) -> u32 {
        std::mem::take(&mut self.bonus_turns)
    }
}

/// Players in turn order, with ordinals handed out on arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster from names, in turn order.
    #[instrument(skip(names))]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.join(name);
        }
        roster
    }

    /// Adds a player and returns the assigned ordinal.
    pub fn join(&mut self, name: impl Into<String>) -> usize {
        let ordinal = self.players.len() + 1;
        let player = Player::new(name, ordinal);
        debug!(ordinal, name = %player.name, "Player joined");
        self.players.push(player);
        ordinal
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nobody has joined.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player by ordinal.
    pub fn by_ordinal(&self, ordinal: usize) -> Option<&Player> {
        ordinal.checked_sub(1).and_then(|i| self.players.get(i))
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_arrival() {
        let roster = Roster::from_names(["Anna", "Bruno", "Carla"]);
        let ordinals: Vec<usize> = roster.players().iter().map(|p| *p.ordinal()).collect();
        assert_eq!(ordinals, [1, 2, 3]);
        assert_eq!(roster.by_ordinal(2).unwrap().name(), "Bruno");
        assert!(roster.by_ordinal(0).is_none());
    }

    #[test]
    fn test_separate_rosters_number_independently() {
        let first = Roster::from_names(["A", "B"]);
        let second = Roster::from_names(["C"]);
        assert_eq!(*first.players()[1].ordinal(), 2);
        assert_eq!(*second.players()[0].ordinal(), 1);
    }

    #[test]
    fn test_bonus_turns() {
        let mut player = Player::new("A", 1);
        assert_eq!(player.take_bonus_turns(), 0);
        player.grant_bonus_turn();
        player.grant_bonus_turn();
        assert_eq!(player.take_bonus_turns(), 2);
        assert_eq!(player.take_bonus_turns(), 0);
    }
}
