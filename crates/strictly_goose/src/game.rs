//! The round-by-round game loop.

use crate::board::Board;
use crate::config::RulesConfig;
use crate::dice::Dice;
use crate::engine::{TurnEngine, TurnOutcome};
use crate::error::GooseError;
use crate::event::{AnimationEvent, END_OF_TURN};
use crate::player::{Player, Roster};
use crate::sink::AnimationSink;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nobody has reached the finish yet.
    InProgress,
    /// The player with this ordinal won.
    Won(usize),
}

/// How a finished game went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Ordinal of the winner.
    pub winner_ordinal: usize,
    /// Name of the winner.
    pub winner_name: String,
    /// Rounds started, including the winning one.
    pub rounds: usize,
    /// Turns played, idle and bonus turns included.
    pub turns: usize,
}

/// A goose game: a board, the players racing on it, and the rules.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    roster: Roster,
    rules: RulesConfig,
    status: GameStatus,
    rounds: usize,
    turns: usize,
}

impl Game {
    /// Creates a game; every player starts on cell 0.
    ///
    /// # Errors
    ///
    /// Returns [`GooseError::NoPlayers`] for an empty roster.
    #[instrument(skip(board, roster), fields(players = roster.len()))]
    pub fn new(board: Board, roster: Roster, rules: RulesConfig) -> Result<Self, GooseError> {
        if roster.is_empty() {
            return Err(GooseError::NoPlayers);
        }
        Ok(Self {
            board,
            roster,
            rules,
            status: GameStatus::InProgress,
            rounds: 0,
            turns: 0,
        })
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    /// The rules in force.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Ordinals of the players standing on `index`.
    ///
    /// Diagnostic only; turn resolution never looks at occupancy.
    pub fn occupants(&self, index: usize) -> Vec<usize> {
        self.players()
            .iter()
            .filter(|p| *p.position() == index)
            .map(|p| *p.ordinal())
            .collect()
    }

    /// Plays the game to the end, streaming the animation script to `sink`.
    ///
    /// A game that is already won returns its summary and emits nothing.
    ///
    /// # Errors
    ///
    /// Fails on a board inconsistency or when the sink cannot be written.
    #[instrument(skip_all, fields(cells = self.board.number_of_cells(), players = self.roster.len()))]
    pub fn play(
        &mut self,
        mut dice: impl Dice,
        mut sink: impl AnimationSink,
    ) -> Result<GameSummary, GooseError> {
        if let GameStatus::Won(ordinal) = self.status {
            debug!(ordinal, "Game already over");
            return Ok(self.summary(ordinal));
        }

        sink.emit(&AnimationEvent::GameStart)?;
        sink.emit(&AnimationEvent::TrackLength {
            cells: self.board.number_of_cells(),
        })?;
        for player in self.roster.players() {
            sink.emit(&AnimationEvent::Roster {
                ordinal: *player.ordinal(),
                name: player.name().clone(),
            })?;
        }
        info!("Game started");

        let summary = loop {
            if let Some(summary) = self.play_round(&mut dice, &mut sink)? {
                break summary;
            }
        };

        sink.emit(&AnimationEvent::Victory)?;
        sink.finish()?;
        info!(
            winner = %summary.winner_name,
            rounds = summary.rounds,
            turns = summary.turns,
            "Game over"
        );
        Ok(summary)
    }

    /// Plays one round in turn order; `Some` once somebody wins.
    ///
    /// Nobody acts after the winner in the winning round.
    #[instrument(skip_all, fields(round = self.rounds + 1))]
    pub fn play_round(
        &mut self,
        mut dice: impl Dice,
        mut sink: impl AnimationSink,
    ) -> Result<Option<GameSummary>, GooseError> {
        if let GameStatus::Won(ordinal) = self.status {
            return Ok(Some(self.summary(ordinal)));
        }
        self.rounds += 1;

        let engine = TurnEngine::new(&self.board, *self.rules.double_roll());
        for player in self.roster.players_mut() {
            // Bonus turns earned from here on are owed next round.
            let owed = player.take_bonus_turns();
            for turn in 0..=owed {
                if turn > 0 {
                    debug!(ordinal = player.ordinal(), turn, "Playing bonus turn");
                }
                let outcome = Self::play_turn(&engine, player, &mut dice, &mut sink)?;
                self.turns += 1;

                if outcome.is_win() {
                    let ordinal = *player.ordinal();
                    self.status = GameStatus::Won(ordinal);
                    return Ok(Some(self.summary(ordinal)));
                }
            }
        }
        Ok(None)
    }

    fn play_turn(
        engine: &TurnEngine<'_>,
        player: &mut Player,
        dice: impl Dice,
        mut sink: impl AnimationSink,
    ) -> Result<TurnOutcome, GooseError> {
        sink.emit(&AnimationEvent::Turn {
            ordinal: *player.ordinal(),
        })?;
        let outcome = engine.resolve_turn(player, dice)?;
        for event in outcome.events() {
            sink.emit(event)?;
        }
        if !outcome.is_win() {
            sink.emit(&AnimationEvent::message(END_OF_TURN))?;
        }
        Ok(outcome)
    }

    fn summary(&self, ordinal: usize) -> GameSummary {
        let winner_name = self
            .roster
            .by_ordinal(ordinal)
            .map(|p| p.name().clone())
            .unwrap_or_default();
        GameSummary {
            winner_ordinal: ordinal,
            winner_name,
            rounds: self.rounds,
            turns: self.turns,
        }
    }
}
