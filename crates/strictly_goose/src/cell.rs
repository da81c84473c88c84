//! Track cells and their landing effects.
//!
//! A cell is either *resting* (the token stays: [`CellKind::Start`],
//! [`CellKind::Regular`], [`CellKind::Stop`]) or *redirecting* (the token is
//! sent on: [`CellKind::GoForward`], [`CellKind::GoBack`],
//! [`CellKind::Teleport`], [`CellKind::DoubleRoll`]).

use crate::event::AnimationEvent;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The effect attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellKind {
    /// Index 0, where every player begins.
    Start,
    /// A neutral square.
    Regular,
    /// Moves the token `offset` cells ahead.
    GoForward {
        /// Cells to advance.
        offset: usize,
    },
    /// Moves the token `offset` cells back.
    GoBack {
        /// Cells to retreat.
        offset: usize,
    },
    /// Moves the token straight to `destination`.
    Teleport {
        /// Target index.
        destination: usize,
    },
    /// A resting square that costs `wait_turns` idle turns.
    Stop {
        /// Turns to skip.
        wait_turns: u32,
    },
    /// Grants another roll.
    DoubleRoll,
}

impl CellKind {
    /// Returns true for kinds whose landing is a fixed point.
    pub fn is_resting(self) -> bool {
        matches!(self, CellKind::Start | CellKind::Regular | CellKind::Stop { .. })
    }
}

/// How a landing on a cell resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// The token stays here.
    Rest,
    /// The token continues to the given index, which may lie off the track.
    Redirect(i64),
    /// The token stays here but another roll is owed.
    RollAgain,
}

/// A single square of the track.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Cell {
    /// Position on the track.
    index: usize,
    /// Landing effect.
    kind: CellKind,
    /// Text shown when a token lands here.
    description: String,
}

impl Cell {
    /// Creates a cell.
    pub fn new(index: usize, kind: CellKind, description: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            description: description.into(),
        }
    }

    /// The start cell at index 0.
    pub fn start() -> Self {
        Self::new(0, CellKind::Start, "La casella 0 e' la partenza")
    }

    /// A neutral cell with the stock description.
    pub fn regular(index: usize) -> Self {
        Self::new(index, CellKind::Regular, format!("La casella {} e' vuota", index))
    }

    /// Returns true if landing here ends the chain.
    pub fn is_resting(&self) -> bool {
        self.kind.is_resting()
    }

    /// Static redirect target, before any underflow policy is applied.
    ///
    /// `None` for cells without a fixed target. Targets beyond the `i64`
    /// range saturate, so they always fall off any real track.
    pub fn raw_target(&self) -> Option<i64> {
        let index = saturating_i64(self.index);
        match self.kind {
            CellKind::GoForward { offset } => Some(index.saturating_add(saturating_i64(offset))),
            CellKind::GoBack { offset } => Some(index.saturating_sub(saturating_i64(offset))),
            CellKind::Teleport { destination } => Some(saturating_i64(destination)),
            CellKind::Start | CellKind::Regular | CellKind::Stop { .. } | CellKind::DoubleRoll => None,
        }
    }

    /// Resolves a landing made with `roll`.
    ///
    /// Redirect targets do not depend on the roll.
    #[instrument(level = "trace", skip(self), fields(index = self.index))]
    pub fn resolve_landing(&self, roll: u8) -> Landing {
        match self.kind {
            CellKind::Start | CellKind::Regular | CellKind::Stop { .. } => Landing::Rest,
            CellKind::DoubleRoll => Landing::RollAgain,
            CellKind::GoForward { .. } | CellKind::GoBack { .. } | CellKind::Teleport { .. } => {
                self.raw_target().map_or(Landing::Rest, Landing::Redirect)
            }
        }
    }

    /// Index the token moves to after landing with `roll`.
    ///
    /// Resting cells and `DoubleRoll` return their own index.
    pub fn target_index(&self, roll: u8) -> i64 {
        match self.resolve_landing(roll) {
            Landing::Redirect(target) => target,
            Landing::Rest | Landing::RollAgain => self.index as i64,
        }
    }

    /// Walk from `from` straight onto this cell after a roll.
    pub fn describe_arrival(&self, from: usize) -> Vec<AnimationEvent> {
        vec![AnimationEvent::walk(from + 1..=self.index)]
    }

    /// Walk up to the finish at `track_limit` and back down onto this cell.
    pub fn describe_overshoot_arrival(&self, from: usize, track_limit: usize) -> Vec<AnimationEvent> {
        let forward = from + 1..=track_limit;
        let back = (self.index..track_limit).rev();
        vec![AnimationEvent::walk(forward.chain(back))]
    }

    /// Effect shown while the token sits on this cell.
    ///
    /// Redirecting cells add the walk to `destination`; resting cells ignore it.
    pub fn describe_effect(&self, destination: usize) -> Vec<AnimationEvent> {
        let mut events = vec![AnimationEvent::message(self.description.clone())];
        match self.kind {
            CellKind::GoForward { .. } => {
                events.push(AnimationEvent::walk(self.index + 1..=destination));
            }
            CellKind::GoBack { .. } => {
                events.push(AnimationEvent::walk((destination..self.index).rev()));
            }
            CellKind::Teleport { .. } => {
                events.push(AnimationEvent::walk([destination]));
            }
            CellKind::Start | CellKind::Regular | CellKind::Stop { .. } | CellKind::DoubleRoll => {}
        }
        events
    }
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_kinds() {
        assert!(CellKind::Start.is_resting());
        assert!(CellKind::Regular.is_resting());
        assert!(CellKind::Stop { wait_turns: 2 }.is_resting());
        assert!(!CellKind::DoubleRoll.is_resting());
        assert!(!CellKind::Teleport { destination: 3 }.is_resting());
    }

    #[test]
    fn test_go_back_path_walks_down() {
        let cell = Cell::new(9, CellKind::GoBack { offset: 3 }, "Torna indietro");
        let events = cell.describe_effect(6);
        assert_eq!(events[0], AnimationEvent::message("Torna indietro"));
        assert_eq!(events[1], AnimationEvent::walk([8, 7, 6]));
    }

    #[test]
    fn test_overshoot_walk_touches_limit() {
        let cell = Cell::regular(17);
        let events = cell.describe_overshoot_arrival(17, 20);
        assert_eq!(events, vec![AnimationEvent::walk([18, 19, 20, 19, 18, 17])]);
    }

    #[test]
    fn test_huge_offsets_saturate() {
        let forward = Cell::new(3, CellKind::GoForward { offset: usize::MAX - 1 }, "");
        assert_eq!(forward.raw_target(), Some(i64::MAX));
        let back = Cell::new(3, CellKind::GoBack { offset: usize::MAX }, "");
        assert_eq!(back.raw_target(), Some(3 - i64::MAX));
        let teleport = Cell::new(3, CellKind::Teleport { destination: usize::MAX }, "");
        assert_eq!(teleport.raw_target(), Some(i64::MAX));
    }
}
