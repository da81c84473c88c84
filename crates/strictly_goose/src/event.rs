//! Animation events: the wire protocol consumed by the board viewer.
//!
//! Each event renders as exactly one line of the animation script.
//! Ordering is significant; the viewer replays the lines top to bottom.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading keyword of an animation script line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ScriptKeyword {
    /// Session start (`OCA GIOCO`).
    Gioco,
    /// Track length.
    Caselle,
    /// Roster entry.
    Giocatore,
    /// Turn start.
    Turno,
    /// Dice result.
    Dado,
    /// Token path.
    Sposta,
    /// Free-text status line.
    Messaggio,
    /// Victory marker.
    Vince,
}

/// Fixed message closing every turn that did not end the game.
pub const END_OF_TURN: &str = "Fine turno";

/// One command of the animation script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnimationEvent {
    /// The session begins.
    GameStart,
    /// Number of cells on the track (excluding the finish).
    TrackLength {
        /// Last cell index.
        cells: usize,
    },
    /// A participant, in turn order.
    Roster {
        /// 1-based turn order.
        ordinal: usize,
        /// Display name.
        name: String,
    },
    /// A player's turn begins.
    Turn {
        /// Ordinal of the acting player.
        ordinal: usize,
    },
    /// A dice result.
    Dice {
        /// Face value, 1 to 6.
        value: u8,
    },
    /// A continuous path the token visibly walks through.
    Move {
        /// Cell indices in walking order.
        path: Vec<usize>,
    },
    /// A status or flavour line.
    Message {
        /// Text shown by the viewer.
        text: String,
    },
    /// The game is won; closes the session.
    Victory,
}

impl AnimationEvent {
    /// Builds a message event.
    pub fn message(text: impl Into<String>) -> Self {
        AnimationEvent::Message { text: text.into() }
    }

    /// Builds a move event along `path`.
    pub fn walk(path: impl IntoIterator<Item = usize>) -> Self {
        AnimationEvent::Move {
            path: path.into_iter().collect(),
        }
    }

    /// Returns the script keyword this event starts with.
    pub fn keyword(&self) -> ScriptKeyword {
        match self {
            AnimationEvent::GameStart => ScriptKeyword::Gioco,
            AnimationEvent::TrackLength { .. } => ScriptKeyword::Caselle,
            AnimationEvent::Roster { .. } => ScriptKeyword::Giocatore,
            AnimationEvent::Turn { .. } => ScriptKeyword::Turno,
            AnimationEvent::Dice { .. } => ScriptKeyword::Dado,
            AnimationEvent::Move { .. } => ScriptKeyword::Sposta,
            AnimationEvent::Message { .. } => ScriptKeyword::Messaggio,
            AnimationEvent::Victory => ScriptKeyword::Vince,
        }
    }
}

impl fmt::Display for AnimationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            AnimationEvent::GameStart => write!(f, "OCA {}", keyword),
            AnimationEvent::TrackLength { cells } => write!(f, "{} {}", keyword, cells),
            AnimationEvent::Roster { ordinal, name } => {
                write!(f, "{} {} {}", keyword, ordinal, name)
            }
            AnimationEvent::Turn { ordinal } => write!(f, "{} {}", keyword, ordinal),
            AnimationEvent::Dice { value } => write!(f, "{} {}", keyword, value),
            AnimationEvent::Move { path } => {
                write!(f, "{}", keyword)?;
                for index in path {
                    write!(f, " {}", index)?;
                }
                Ok(())
            }
            AnimationEvent::Message { text } => write!(f, "{} {}", keyword, text),
            AnimationEvent::Victory => write!(f, "{}", keyword),
        }
    }
}
