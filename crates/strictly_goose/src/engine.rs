//! Turn resolution: one roll (or more) for one player.
//!
//! A turn goes through four steps:
//!
//! 1. **Idle check** - a player owing wait turns spends one and stops.
//! 2. **Roll and classify** - the new index is compared with the finish:
//!    exactly on it wins, short of it lands there, past it bounces back
//!    by the excess.
//! 3. **Chain** - redirecting cells are followed until a resting cell.
//! 4. **Settle** - the position is stored and `Stop` cells set the wait.
//!
//! The board is only read; the acting player is the only state written.

use crate::board::Board;
use crate::cell::{CellKind, Landing};
use crate::config::DoubleRollPolicy;
use crate::dice::Dice;
use crate::error::ConsistencyError;
use crate::event::AnimationEvent;
use crate::invariants::{InvariantSet, Placement, PlacementInvariants};
use crate::player::Player;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};

/// Where a roll takes a token relative to the finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollClass {
    /// The roll ends exactly on the finish.
    Win,
    /// The roll ends on the track.
    Within {
        /// Cell reached.
        landing: usize,
    },
    /// The roll passes the finish and bounces back by `excess`.
    Overshoot {
        /// Cell reached after bouncing, negative on very short tracks.
        landing: i64,
        /// Steps beyond the finish.
        excess: usize,
    },
}

/// Classifies a roll of `dice` from `before` against the finish.
///
/// `before` is always on the track, so `before < track_limit`.
pub fn classify_roll(before: usize, dice: u8, track_limit: usize) -> RollClass {
    let after = before + dice as usize;
    match after.cmp(&track_limit) {
        Ordering::Equal => RollClass::Win,
        Ordering::Less => RollClass::Within { landing: after },
        Ordering::Greater => {
            let excess = dice as usize - (track_limit - before);
            RollClass::Overshoot {
                landing: track_limit as i64 - excess as i64,
                excess,
            }
        }
    }
}

/// Everything that happened during one player's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    rolls: Vec<u8>,
    final_index: usize,
    won: bool,
    events: Vec<AnimationEvent>,
}

impl TurnOutcome {
    fn idle(position: usize) -> Self {
        Self {
            rolls: Vec::new(),
            final_index: position,
            won: false,
            events: Vec::new(),
        }
    }

    /// Dice results in the order they were rolled; empty for an idle turn.
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Cell the token rests on, or the finish index after a win.
    pub fn final_index(&self) -> usize {
        self.final_index
    }

    /// Returns true if the turn reached the finish.
    pub fn is_win(&self) -> bool {
        self.won
    }

    /// Returns true if the player spent the turn waiting.
    pub fn is_idle(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Animation events of the turn, in order.
    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    /// Takes the animation events.
    pub fn into_events(self) -> Vec<AnimationEvent> {
        self.events
    }
}

/// How a chain of redirects ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainEnd {
    /// Resting on the cell.
    Rest(usize),
    /// Standing on a `DoubleRoll` cell with a roll owed now.
    RollAgain(usize),
    /// Standing on a `DoubleRoll` cell with a turn owed next round.
    BonusTurn(usize),
}

/// Resolves turns on a fixed board.
#[derive(Debug, Clone, Copy)]
pub struct TurnEngine<'a> {
    board: &'a Board,
    double_roll: DoubleRollPolicy,
}

impl<'a> TurnEngine<'a> {
    /// Creates an engine for `board`.
    pub fn new(board: &'a Board, double_roll: DoubleRollPolicy) -> Self {
        Self { board, double_roll }
    }

    /// The board turns are resolved on.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Plays one turn for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if any step computes an index off the
    /// board or a redirect chain fails to settle.
    #[instrument(skip(self, player, dice), fields(player = %player.name(), ordinal = player.ordinal()))]
    pub fn resolve_turn(
        &self,
        player: &mut Player,
        mut dice: impl Dice,
    ) -> Result<TurnOutcome, ConsistencyError> {
        if !player.can_move() {
            player.decrease_wait();
            info!(remaining = player.wait_turns(), "Player waits");
            return Ok(TurnOutcome::idle(*player.position()));
        }

        let track_limit = self.board.track_limit();
        let mut events = Vec::new();
        let mut rolls = Vec::new();
        let mut from = *player.position();

        loop {
            let roll = dice.roll();
            rolls.push(roll);
            events.push(AnimationEvent::Dice { value: roll });

            let landing = match classify_roll(from, roll, track_limit) {
                RollClass::Win => {
                    events.push(AnimationEvent::walk(from + 1..=track_limit));
                    events.push(AnimationEvent::message(format!("{} vince!", player.name())));
                    info!(roll, from, "Player reaches the finish");
                    return Ok(TurnOutcome {
                        rolls,
                        final_index: track_limit,
                        won: true,
                        events,
                    });
                }
                RollClass::Within { landing } => {
                    let cell = self.board.cell_at(landing)?;
                    events.extend(cell.describe_arrival(from));
                    landing
                }
                RollClass::Overshoot { landing, excess } => {
                    let landing = self.board.checked_index(landing)?;
                    debug!(roll, from, excess, landing, "Bounced back from the finish");
                    let cell = self.board.cell_at(landing)?;
                    events.extend(cell.describe_overshoot_arrival(from, track_limit));
                    landing
                }
            };

            match self.resolve_chain(landing, roll, &mut events)? {
                ChainEnd::Rest(index) => {
                    self.settle(player, index)?;
                    break;
                }
                ChainEnd::BonusTurn(index) => {
                    self.settle(player, index)?;
                    player.grant_bonus_turn();
                    info!(index, "Bonus turn granted");
                    break;
                }
                ChainEnd::RollAgain(index) => {
                    debug!(index, "Rolling again");
                    from = index;
                }
            }
        }

        Ok(TurnOutcome {
            rolls,
            final_index: *player.position(),
            won: false,
            events,
        })
    }

    /// Follows redirects from `start` until a cell keeps the token.
    fn resolve_chain(
        &self,
        start: usize,
        roll: u8,
        events: &mut Vec<AnimationEvent>,
    ) -> Result<ChainEnd, ConsistencyError> {
        let mut current = start;
        let mut steps = 0;

        loop {
            let cell = self.board.cell_at(current)?;
            match cell.resolve_landing(roll) {
                Landing::Rest => {
                    events.extend(cell.describe_effect(current));
                    return Ok(ChainEnd::Rest(current));
                }
                Landing::RollAgain => {
                    events.extend(cell.describe_effect(current));
                    return Ok(match self.double_roll {
                        DoubleRollPolicy::RollAgain => ChainEnd::RollAgain(current),
                        DoubleRollPolicy::ExtraTurn => ChainEnd::BonusTurn(current),
                    });
                }
                Landing::Redirect(raw) => {
                    let next = self
                        .board
                        .redirect_target(cell)?
                        .ok_or_else(|| ConsistencyError::new("redirect without a target", raw))?;
                    events.extend(cell.describe_effect(next));
                    debug!(from = current, to = next, "Redirected");

                    steps += 1;
                    if steps > self.board.number_of_cells() {
                        warn!(start, steps, "Redirect chain does not settle");
                        return Err(ConsistencyError::new(
                            "redirect chain does not settle",
                            start as i64,
                        ));
                    }
                    current = next;
                }
            }
        }
    }

    /// Stores the resting index and applies `Stop` waits.
    fn settle(&self, player: &mut Player, index: usize) -> Result<(), ConsistencyError> {
        let cell = self.board.cell_at(index)?;
        player.set_position(index);
        if let CellKind::Stop { wait_turns } = *cell.kind() {
            player.set_wait_turns(wait_turns);
            info!(index, wait_turns, "Player stopped");
        }

        PlacementInvariants::check_all(&Placement {
            board: self.board,
            player: &*player,
        })
        .map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ConsistencyError::new(
                format!("Postcondition failed: {}", descriptions),
                index as i64,
            )
        })
    }
}
