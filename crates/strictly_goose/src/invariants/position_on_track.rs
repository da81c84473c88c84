//! Position invariant: a settled player stands on a real cell.

use super::{Invariant, Placement};

/// Invariant: the player's index names a cell in `0..=N`.
///
/// The finish (`N + 1`) is never a resting place; reaching it ends the game
/// before the position is stored.
pub struct PositionOnTrack;

impl<'a> Invariant<Placement<'a>> for PositionOnTrack {
    fn holds(state: &Placement<'a>) -> bool {
        *state.player.position() <= state.board.number_of_cells()
    }

    fn description() -> &'static str {
        "Player position lies on the track"
    }
}
