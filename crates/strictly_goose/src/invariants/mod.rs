//! Properties every settled player must satisfy.
//!
//! The turn engine checks them after each resolved turn. A violation means
//! the board graph or the engine itself is broken, never that a player
//! made a bad move.

use crate::board::Board;
use crate::player::Player;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A player as placed on a board at the end of a turn.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// The track.
    pub board: &'a Board,
    /// The settled player.
    pub player: &'a Player,
}

pub mod position_on_track;
pub mod wait_follows_stop;

pub use position_on_track::PositionOnTrack;
pub use wait_follows_stop::WaitFollowsStop;

/// All placement invariants as a composable set.
pub type PlacementInvariants = (PositionOnTrack, WaitFollowsStop);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnderflowPolicy;

    #[test]
    fn test_fresh_player_holds() {
        let board = Board::new(6, Vec::new(), UnderflowPolicy::Reject).unwrap();
        let player = Player::new("A", 1);
        let placement = Placement {
            board: &board,
            player: &player,
        };
        assert!(PlacementInvariants::check_all(&placement).is_ok());
    }

    #[test]
    fn test_violations_are_collected() {
        let board = Board::new(6, Vec::new(), UnderflowPolicy::Reject).unwrap();
        let mut player = Player::new("A", 1);
        player.set_position(9);
        player.set_wait_turns(1);
        let placement = Placement {
            board: &board,
            player: &player,
        };
        let violations = PlacementInvariants::check_all(&placement).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
