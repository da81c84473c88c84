//! The track: an immutable, indexed sequence of cells.

use crate::cell::{Cell, CellKind};
use crate::config::UnderflowPolicy;
use crate::error::{BoardFormatError, ConsistencyError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A special cell as read from a board definition.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CellRecord {
    /// Position on the track, `1..=N`.
    index: usize,
    /// Effect of the cell.
    kind: CellKind,
    /// Free-text description.
    description: String,
}

impl CellRecord {
    /// Creates a record.
    pub fn new(index: usize, kind: CellKind, description: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            description: description.into(),
        }
    }
}

/// Game board with `N + 1` cells indexed `0..=N`.
///
/// Index 0 is the start; `N + 1` is the finish, which has no cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: Vec<Cell>,
    underflow: UnderflowPolicy,
}

impl Board {
    /// Builds a board of `number_of_cells` cells from the special-cell records.
    ///
    /// Unlisted indices become regular cells. Redirect targets are checked
    /// against the track and against each other, so a board that loads can
    /// never loop forever.
    #[instrument(skip(records))]
    pub fn new(
        number_of_cells: usize,
        records: impl IntoIterator<Item = CellRecord>,
        underflow: UnderflowPolicy,
    ) -> Result<Self, BoardFormatError> {
        if number_of_cells == 0 {
            return Err(BoardFormatError::EmptyTrack {
                declared: number_of_cells,
            });
        }

        let mut cells: Vec<Cell> = std::iter::once(Cell::start())
            .chain((1..=number_of_cells).map(Cell::regular))
            .collect();
        let mut defined = vec![false; number_of_cells + 1];

        for record in records {
            let CellRecord {
                index,
                kind,
                description,
            } = record;

            if index == 0 || index > number_of_cells {
                warn!(index, number_of_cells, "Record outside the track");
                return Err(BoardFormatError::CellIndexOutOfRange {
                    index,
                    number_of_cells,
                });
            }
            if kind == CellKind::Start {
                return Err(BoardFormatError::MisplacedStart { index });
            }
            if defined[index] {
                return Err(BoardFormatError::DuplicateCell { index });
            }
            defined[index] = true;
            cells[index] = Cell::new(index, kind, description);
        }

        let board = Self { cells, underflow };
        board.check_redirect_targets()?;
        board.check_redirect_cycles()?;

        info!(
            number_of_cells,
            special = defined.iter().filter(|d| **d).count(),
            "Board built"
        );
        Ok(board)
    }

    /// Returns the cell at `index`.
    ///
    /// Failing here means an earlier step computed a bad index.
    #[track_caller]
    pub fn cell_at(&self, index: usize) -> Result<&Cell, ConsistencyError> {
        match self.cells.get(index) {
            Some(cell) => Ok(cell),
            None => Err(ConsistencyError::new(
                "cell index outside the board",
                i64::try_from(index).unwrap_or(i64::MAX),
            )),
        }
    }

    /// Converts a signed index into a track position.
    #[track_caller]
    pub fn checked_index(&self, index: i64) -> Result<usize, ConsistencyError> {
        match usize::try_from(index) {
            Ok(i) if i < self.cells.len() => Ok(i),
            _ => Err(ConsistencyError::new("computed index falls off the track", index)),
        }
    }

    /// The finish index, `N + 1`.
    pub fn track_limit(&self) -> usize {
        self.cells.len()
    }

    /// The last cell index, `N`.
    pub fn number_of_cells(&self) -> usize {
        self.cells.len() - 1
    }

    /// All cells in track order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The policy applied to `GoBack` cells pointing below the start.
    pub fn underflow_policy(&self) -> UnderflowPolicy {
        self.underflow
    }

    /// Redirect target of `cell` on this board, after the underflow policy.
    ///
    /// `None` when the cell has no fixed target.
    #[track_caller]
    pub fn redirect_target(&self, cell: &Cell) -> Result<Option<usize>, ConsistencyError> {
        let Some(raw) = cell.raw_target() else {
            return Ok(None);
        };
        let raw = match (cell.kind(), self.underflow) {
            (CellKind::GoBack { .. }, UnderflowPolicy::Clamp) => raw.max(0),
            _ => raw,
        };
        self.checked_index(raw).map(Some)
    }

    fn check_redirect_targets(&self) -> Result<(), BoardFormatError> {
        for cell in &self.cells {
            if self.redirect_target(cell).is_err() {
                let target = cell.raw_target().unwrap_or_default();
                warn!(index = cell.index(), target, "Redirect leaves the track");
                return Err(BoardFormatError::RedirectOutOfRange {
                    index: *cell.index(),
                    target,
                    number_of_cells: self.number_of_cells(),
                });
            }
        }
        Ok(())
    }

    /// Every cell has at most one fixed successor, so each walk either
    /// reaches a cell without one or closes a loop.
    fn check_redirect_cycles(&self) -> Result<(), BoardFormatError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unseen,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Unseen; self.cells.len()];
        for start in 0..self.cells.len() {
            let mut path = Vec::new();
            let mut current = start;
            while marks[current] == Mark::Unseen {
                marks[current] = Mark::OnPath;
                path.push(current);
                match self.redirect_target(&self.cells[current]) {
                    Ok(Some(next)) => current = next,
                    _ => break,
                }
            }

            if marks[current] == Mark::OnPath && self.cells[current].raw_target().is_some() {
                if let Some(pos) = path.iter().position(|i| *i == current) {
                    let cycle = path[pos..].to_vec();
                    warn!(?cycle, "Redirect cycle");
                    return Err(BoardFormatError::RedirectCycle { cycle });
                }
            }

            for index in path {
                marks[index] = Mark::Done;
            }
        }
        debug!("No redirect cycles");
        Ok(())
    }
}
