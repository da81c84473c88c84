//! Error types for board loading and turn resolution.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// A board definition that cannot be turned into a playable track.
///
/// All variants are fatal: they are reported before any turn is played.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardFormatError {
    /// The first line is not the `OCA TAVOLA` header.
    #[display("Board file must start with 'OCA TAVOLA', found {found:?}")]
    MissingHeader {
        /// What the first non-empty line actually contained.
        found: String,
    },

    /// No `CASELLE <n>` line precedes the first cell directive.
    #[display("Line {line}: cell directive before the CASELLE declaration")]
    MissingCellCount {
        /// Line of the offending directive.
        line: usize,
    },

    /// `CASELLE` was declared more than once.
    #[display("Line {line}: CASELLE declared twice")]
    DuplicateCellCount {
        /// Line of the second declaration.
        line: usize,
    },

    /// The declared track has no cells beyond the start.
    #[display("The track must declare at least one cell, got {declared}")]
    EmptyTrack {
        /// The declared cell count.
        declared: usize,
    },

    /// A numeric field could not be parsed.
    #[display("Line {line}: expected a number for {field}, found {found:?}")]
    InvalidNumber {
        /// Line of the offending field.
        line: usize,
        /// Which field was being read.
        field: &'static str,
        /// Raw token.
        found: String,
    },

    /// A directive is missing its numeric parameter.
    #[display("Line {line}: {keyword} requires a {field}")]
    MissingParameter {
        /// Line of the directive.
        line: usize,
        /// Directive keyword.
        keyword: String,
        /// Name of the missing parameter.
        field: &'static str,
    },

    /// The line is not a known directive.
    #[display("Line {line}: unknown directive {text:?}")]
    UnknownDirective {
        /// Line of the directive.
        line: usize,
        /// Raw line contents.
        text: String,
    },

    /// A `COMMENTO INIZIO` block is never closed.
    #[display("Line {line}: comment block is never closed")]
    UnterminatedComment {
        /// Line where the block opened.
        line: usize,
    },

    /// A directive names a cell outside `[1, N]`.
    #[display("Cell {index} is outside the track 1..={number_of_cells}")]
    CellIndexOutOfRange {
        /// Index named by the directive.
        index: usize,
        /// Declared track length.
        number_of_cells: usize,
    },

    /// Two directives define the same cell.
    #[display("Cell {index} is defined more than once")]
    DuplicateCell {
        /// The repeated index.
        index: usize,
    },

    /// A start cell was placed anywhere but index 0.
    #[display("Cell {index} cannot be a start cell")]
    MisplacedStart {
        /// Index of the extra start cell.
        index: usize,
    },

    /// A redirecting cell points outside `[0, N]`.
    #[display("Cell {index} redirects to {target}, outside the track 0..={number_of_cells}")]
    RedirectOutOfRange {
        /// Redirecting cell.
        index: usize,
        /// Computed target, possibly negative.
        target: i64,
        /// Declared track length.
        number_of_cells: usize,
    },

    /// Redirecting cells form a loop that no roll can leave.
    #[display("Redirect cycle through cells {cycle:?}")]
    RedirectCycle {
        /// Indices on the cycle, in visiting order.
        cycle: Vec<usize>,
    },
}

/// A runtime index fell outside the board.
///
/// Indicates a malformed board graph that slipped past validation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Consistency error: {} (index {}) at {}:{}", message, index, file, line)]
pub struct ConsistencyError {
    /// What went wrong.
    pub message: String,
    /// The offending index, possibly negative.
    pub index: i64,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl ConsistencyError {
    /// Creates a new consistency error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>, index: i64) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            index,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Any failure while loading or playing a game.
#[derive(Debug, Display, Error, From)]
pub enum GooseError {
    /// Malformed board definition.
    #[display("{_0}")]
    Format(BoardFormatError),

    /// Board graph inconsistency detected during play.
    #[display("{_0}")]
    Consistency(ConsistencyError),

    /// Invalid rules configuration.
    #[display("{_0}")]
    Config(ConfigError),

    /// Reading the board or writing the script failed.
    #[display("I/O error: {_0}")]
    Io(std::io::Error),

    /// The game was started without anyone to play it.
    #[display("A game needs at least one player")]
    #[from(skip)]
    NoPlayers,
}
