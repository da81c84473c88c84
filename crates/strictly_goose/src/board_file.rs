//! Reader for the `OCA TAVOLA` board-definition format.
//!
//! ```text
//! OCA TAVOLA
//! CASELLE 20
//! COMMENTO INIZIO
//! anything until the closing line
//! COMMENTO FINE
//! 5 AVANTI 3 Il ponte ti porta avanti
//! 9 INDIETRO 4 Scivoli indietro
//! 12 VAI 2 Il labirinto
//! 14 FERMO 2 La locanda
//! 17 DOPPIO Tira ancora
//! ```

use crate::board::{Board, CellRecord};
use crate::cell::CellKind;
use crate::config::UnderflowPolicy;
use crate::error::{BoardFormatError, GooseError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Header line every board file starts with.
pub const HEADER: &str = "OCA TAVOLA";
const CELL_COUNT: &str = "CASELLE";
const COMMENT: &str = "COMMENTO";
const COMMENT_START: &str = "INIZIO";
const COMMENT_END: &str = "FINE";

/// Keyword of a special-cell line.
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
pub enum Directive {
    /// Go forward by a number of cells.
    Avanti,
    /// Go back by a number of cells.
    Indietro,
    /// Roll again.
    Doppio,
    /// Stop for a number of turns.
    Fermo,
    /// Teleport to a cell.
    Vai,
}

impl Directive {
    /// Name of the numeric parameter, if the directive takes one.
    pub fn parameter(self) -> Option<&'static str> {
        match self {
            Directive::Avanti | Directive::Indietro => Some("cell offset"),
            Directive::Fermo => Some("number of turns"),
            Directive::Vai => Some("destination"),
            Directive::Doppio => None,
        }
    }

    /// `None` when the parameter does not fit the cell kind.
    fn cell_kind(self, parameter: Option<usize>) -> Option<CellKind> {
        let value = parameter.unwrap_or_default();
        let kind = match self {
            Directive::Avanti => CellKind::GoForward { offset: value },
            Directive::Indietro => CellKind::GoBack { offset: value },
            Directive::Vai => CellKind::Teleport { destination: value },
            Directive::Fermo => CellKind::Stop {
                wait_turns: u32::try_from(value).ok()?,
            },
            Directive::Doppio => CellKind::DoubleRoll,
        };
        Some(kind)
    }
}

/// A parsed board file, ready to be built into a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BoardDefinition {
    /// Last cell index, `N`.
    number_of_cells: usize,
    /// Special cells in file order.
    records: Vec<CellRecord>,
}

impl BoardDefinition {
    /// Builds and validates the board.
    pub fn into_board(self, underflow: UnderflowPolicy) -> Result<Board, BoardFormatError> {
        Board::new(self.number_of_cells, self.records, underflow)
    }
}

impl FromStr for BoardDefinition {
    type Err = BoardFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_board(s)
    }
}

/// Reads and parses a board file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_board_file(path: impl AsRef<Path>) -> Result<BoardDefinition, GooseError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let definition = parse_board(&text)?;
    info!(
        number_of_cells = definition.number_of_cells,
        special = definition.records.len(),
        "Board file loaded"
    );
    Ok(definition)
}

/// Parses board-definition text.
#[instrument(skip(text))]
pub fn parse_board(text: &str) -> Result<BoardDefinition, BoardFormatError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let header = lines.next().map(|(_, line)| line).unwrap_or_default();
    if header.split_whitespace().ne(HEADER.split_whitespace()) {
        warn!(header, "Missing board header");
        return Err(BoardFormatError::MissingHeader {
            found: header.to_string(),
        });
    }

    let mut number_of_cells = None;
    let mut records = Vec::new();

    while let Some((line_no, line)) = lines.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [CELL_COUNT, rest @ ..] => {
                if number_of_cells.is_some() {
                    return Err(BoardFormatError::DuplicateCellCount { line: line_no });
                }
                let count = parse_number(rest.first().copied(), line_no, "cell count")?;
                debug!(count, "Cell count declared");
                number_of_cells = Some(count);
            }
            [COMMENT, COMMENT_START, ..] => {
                let closed = lines.by_ref().any(|(_, l)| {
                    let mut words = l.split_whitespace();
                    words.next() == Some(COMMENT) && words.next() == Some(COMMENT_END)
                });
                if !closed {
                    return Err(BoardFormatError::UnterminatedComment { line: line_no });
                }
            }
            [index, keyword, rest @ ..] => {
                let Ok(directive) = Directive::from_str(keyword) else {
                    return Err(BoardFormatError::UnknownDirective {
                        line: line_no,
                        text: line.to_string(),
                    });
                };
                if number_of_cells.is_none() {
                    return Err(BoardFormatError::MissingCellCount { line: line_no });
                }
                let index = parse_number(Some(*index), line_no, "cell index")?;
                let (parameter, description) = match directive.parameter() {
                    Some(field) => {
                        let Some(raw) = rest.first() else {
                            return Err(BoardFormatError::MissingParameter {
                                line: line_no,
                                keyword: directive.to_string(),
                                field,
                            });
                        };
                        (Some(parse_number(Some(*raw), line_no, field)?), &rest[1..])
                    }
                    None => (None, rest),
                };
                let Some(kind) = directive.cell_kind(parameter) else {
                    return Err(BoardFormatError::InvalidNumber {
                        line: line_no,
                        field: directive.parameter().unwrap_or_default(),
                        found: rest.first().copied().unwrap_or_default().to_string(),
                    });
                };
                records.push(CellRecord::new(index, kind, description.join(" ")));
            }
            _ => {
                return Err(BoardFormatError::UnknownDirective {
                    line: line_no,
                    text: line.to_string(),
                });
            }
        }
    }

    let number_of_cells = number_of_cells.ok_or(BoardFormatError::MissingCellCount {
        line: text.lines().count(),
    })?;
    if number_of_cells == 0 {
        return Err(BoardFormatError::EmptyTrack { declared: 0 });
    }
    if let Some(record) = records
        .iter()
        .find(|r| *r.index() == 0 || *r.index() > number_of_cells)
    {
        return Err(BoardFormatError::CellIndexOutOfRange {
            index: *record.index(),
            number_of_cells,
        });
    }

    Ok(BoardDefinition {
        number_of_cells,
        records,
    })
}

fn parse_number(token: Option<&str>, line: usize, field: &'static str) -> Result<usize, BoardFormatError> {
    let token = token.unwrap_or_default();
    token.parse().map_err(|_| BoardFormatError::InvalidNumber {
        line,
        field,
        found: token.to_string(),
    })
}
