//! The 3x3 board: cell storage, placement validation, win and draw scans.
//!
//! `Board` owns the cells and nothing else. Turn order, symbol display and
//! scoring live above it; the board only answers "is this placement legal"
//! and "does any line belong to one side".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Board dimension. The game is fixed at 3x3.
pub const SIZE: usize = 3;

const CELL_COUNT: usize = SIZE * SIZE;

/// Move ownership tag, distinct from the X/O display symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player.
    Human,
    /// The random opponent.
    Computer,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Computer => write!(f, "computer"),
        }
    }
}

/// One cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    Empty,
    /// Marked by a side. Never un-set for the rest of the round.
    Taken(Side),
}

/// Board coordinate, 0-based, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a coordinate. Bounds are checked at placement, not here.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Whether both components are on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A placement the board refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlaceError {
    /// Coordinate outside the 3x3 grid. Callers validate clicks before
    /// forwarding them, so hitting this indicates a caller bug.
    #[error("cell {at} is outside the board")]
    OutOfBounds { at: Coord },
    /// Cell already carries a mark. Marks are never retracted.
    #[error("cell {at} is already occupied")]
    Occupied { at: Coord },
}

/// The 8 winning triples: 3 rows, 3 columns, 2 diagonals.
const LINES: [[Coord; 3]; 8] = [
    [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
    [Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)],
    [Coord::new(2, 0), Coord::new(2, 1), Coord::new(2, 2)],
    [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
    [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)],
    [Coord::new(0, 2), Coord::new(1, 2), Coord::new(2, 2)],
    [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
    [Coord::new(0, 2), Coord::new(1, 1), Coord::new(2, 0)],
];

/// 3x3 grid of cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Cell at a coordinate, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, at: Coord) -> Option<Cell> {
        if at.in_bounds() {
            Some(self.cells[at.index()])
        } else {
            None
        }
    }

    /// Whether the cell exists and is unmarked.
    #[must_use]
    pub fn is_empty(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(Cell::Empty))
    }

    /// Places a mark for `side`.
    ///
    /// # Errors
    ///
    /// Rejects out-of-bounds coordinates and occupied cells; the board is
    /// left untouched in both cases.
    pub fn place(&mut self, at: Coord, side: Side) -> Result<(), PlaceError> {
        if !at.in_bounds() {
            return Err(PlaceError::OutOfBounds { at });
        }
        if self.cells[at.index()] != Cell::Empty {
            return Err(PlaceError::Occupied { at });
        }
        self.cells[at.index()] = Cell::Taken(side);
        Ok(())
    }

    /// Unmarked cells in row-major order. At most 9 entries, so the list
    /// lives on the stack.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[Coord; CELL_COUNT]> {
        let mut open = SmallVec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let at = Coord::new(row, col);
                if self.cells[at.index()] == Cell::Empty {
                    open.push(at);
                }
            }
        }
        open
    }

    /// The side occupying any complete line, if one exists.
    ///
    /// All 8 lines are checked. In a legal game at most one side can hold a
    /// complete line, so scan order does not matter.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        for [a, b, c] in LINES {
            if let Cell::Taken(side) = self.cells[a.index()] {
                if self.cells[b.index()] == Cell::Taken(side)
                    && self.cells[c.index()] == Cell::Taken(side)
                {
                    return Some(side);
                }
            }
        }
        None
    }

    /// Whether every cell is marked.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// All cells as a row-major slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_open() {
        let board = Board::new();
        assert_eq!(board.winner(), None);
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_place_and_get() {
        let mut board = Board::new();
        let at = Coord::new(1, 2);

        assert!(board.is_empty(at));
        board.place(at, Side::Human).unwrap();
        assert_eq!(board.get(at), Some(Cell::Taken(Side::Human)));
        assert!(!board.is_empty(at));
    }

    #[test]
    fn test_place_occupied_rejected() {
        let mut board = Board::new();
        let at = Coord::new(0, 0);

        board.place(at, Side::Human).unwrap();
        let before = board.clone();

        let err = board.place(at, Side::Computer).unwrap_err();
        assert_eq!(err, PlaceError::Occupied { at });
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_bounds_rejected() {
        let mut board = Board::new();
        let at = Coord::new(3, 0);

        let err = board.place(at, Side::Human).unwrap_err();
        assert_eq!(err, PlaceError::OutOfBounds { at });
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new();
        board.place(Coord::new(0, 1), Side::Human).unwrap();
        board.place(Coord::new(2, 2), Side::Computer).unwrap();

        let open = board.empty_cells();
        assert_eq!(open.len(), 7);
        assert_eq!(open[0], Coord::new(0, 0));
        assert_eq!(open[1], Coord::new(0, 2));
        assert_eq!(open[6], Coord::new(2, 1));
        assert!(open.windows(2).all(|w| w[0].index() < w[1].index()));
    }

    #[test]
    fn test_row_win() {
        let mut board = Board::new();
        for col in 0..SIZE {
            board.place(Coord::new(1, col), Side::Computer).unwrap();
        }
        assert_eq!(board.winner(), Some(Side::Computer));
    }

    #[test]
    fn test_column_win() {
        let mut board = Board::new();
        for row in 0..SIZE {
            board.place(Coord::new(row, 0), Side::Human).unwrap();
        }
        assert_eq!(board.winner(), Some(Side::Human));
    }

    #[test]
    fn test_diagonal_win() {
        let mut board = Board::new();
        for i in 0..SIZE {
            board.place(Coord::new(i, i), Side::Human).unwrap();
        }
        assert_eq!(board.winner(), Some(Side::Human));
    }

    #[test]
    fn test_incomplete_line_no_winner() {
        let mut board = Board::new();
        board.place(Coord::new(0, 0), Side::Human).unwrap();
        board.place(Coord::new(0, 1), Side::Human).unwrap();
        board.place(Coord::new(0, 2), Side::Computer).unwrap();
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = Board::new();
        board.place(Coord::new(0, 0), Side::Human).unwrap();
        board.place(Coord::new(1, 1), Side::Computer).unwrap();

        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Human.opponent(), Side::Computer);
        assert_eq!(Side::Computer.opponent(), Side::Human);
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::new();
        board.place(Coord::new(2, 0), Side::Computer).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let deserialized: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, deserialized);
    }
}
