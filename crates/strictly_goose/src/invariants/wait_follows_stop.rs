//! Wait invariant: idle turns are only owed on a stop cell.

use super::{Invariant, Placement};
use crate::cell::CellKind;

/// Invariant: a player owing idle turns is standing on a `Stop` cell.
pub struct WaitFollowsStop;

impl<'a> Invariant<Placement<'a>> for WaitFollowsStop {
    fn holds(state: &Placement<'a>) -> bool {
        if *state.player.wait_turns() == 0 {
            return true;
        }
        state
            .board
            .cell_at(*state.player.position())
            .map(|cell| matches!(cell.kind(), CellKind::Stop { .. }))
            .unwrap_or(false)
    }

    fn description() -> &'static str {
        "Idle turns are only owed on a stop cell"
    }
}
