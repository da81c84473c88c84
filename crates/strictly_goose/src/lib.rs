//! Strictly Goose - turn resolution for the goose game
//!
//! Players race along a numbered track of special cells. Each turn is
//! resolved into a final resting cell and a deterministic list of
//! animation events that a separate viewer plays back.
//!
//! # Architecture
//!
//! - **Cells**: seven cell kinds, each with its own landing effect
//! - **Board**: the validated, immutable track
//! - **Engine**: one player's turn, with chained redirects and bounce-back
//! - **Game**: rounds in turn order until somebody wins
//! - **Sinks**: the animation script (and an optional JSON-lines export)
//!
//! # Example
//!
//! ```
//! use strictly_goose::{parse_board, AnimationEvent, Game, RandomDice, Roster, RulesConfig};
//!
//! # fn example() -> Result<(), strictly_goose::GooseError> {
//! let rules = RulesConfig::new();
//! let board = parse_board("OCA TAVOLA\nCASELLE 10\n5 FERMO 1 La locanda\n")?
//!     .into_board(*rules.go_back_underflow())?;
//! let mut game = Game::new(board, Roster::from_names(["Anna", "Bruno"]), rules)?;
//!
//! let mut script: Vec<AnimationEvent> = Vec::new();
//! let summary = game.play(RandomDice::seeded(42), &mut script)?;
//! assert_eq!(script.last(), Some(&AnimationEvent::Victory));
//! assert!(summary.rounds >= 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod board_file;
mod cell;
mod config;
mod dice;
mod engine;
mod error;
mod event;
mod game;
pub mod invariants;
mod player;
mod sink;

pub use board::{Board, CellRecord};
pub use board_file::{BoardDefinition, Directive, HEADER, load_board_file, parse_board};
pub use cell::{Cell, CellKind, Landing};
pub use config::{DoubleRollPolicy, RulesConfig, UnderflowPolicy};
pub use dice::{Dice, MAX_FACE, MIN_FACE, RandomDice, ScriptedDice};
pub use engine::{RollClass, TurnEngine, TurnOutcome, classify_roll};
pub use error::{BoardFormatError, ConfigError, ConsistencyError, GooseError};
pub use event::{AnimationEvent, END_OF_TURN, ScriptKeyword};
pub use game::{Game, GameStatus, GameSummary};
pub use player::{Player, Roster};
pub use sink::{AnimationSink, JsonLinesWriter, ScriptWriter, Tee};
