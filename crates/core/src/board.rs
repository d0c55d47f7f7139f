//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of settled cells: 0 is empty, 1..=7 is the kind
//! of the piece that settled there. Uses a flat array for cache locality and
//! no allocation. Coordinates are `(row, col)` with row 0 at the top.

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const ROWS: usize = BOARD_HEIGHT as usize;
const COLS: usize = BOARD_WIDTH as usize;

/// Row indices, ascending. Sized for the whole board so artificial setups
/// with many full rows still fit.
pub type RowList = ArrayVec<usize, ROWS>;

/// Row-major copy of the grid, as handed to renderers
pub type Grid = [[Cell; COLS]; ROWS];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell value at (row, col); `None` when outside the grid
    pub fn cell_at(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, value: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// In bounds and non-empty
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.cell_at(row, col), Some(v) if v != EMPTY)
    }

    /// Mark every given cell with `value`.
    ///
    /// Callers establish legality through the collision check first; a cell
    /// outside the grid here is a caller bug.
    pub fn settle(&mut self, cells: &[(i8, i8)], value: Cell) {
        for &(row, col) in cells {
            let written = self.set(row, col, value);
            debug_assert!(written, "settle outside the grid at ({}, {})", row, col);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLS;
        self.cells[start..start + COLS].iter().all(|&c| c != EMPTY)
    }

    /// Indices of all filled rows, ascending
    pub fn filled_rows(&self) -> RowList {
        (0..ROWS).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Remove the listed rows and add as many empty rows at the top.
    ///
    /// Indices refer to the grid as it is before this call. All of them are
    /// removed in one bottom-up compaction pass, so removing one row never
    /// shifts the meaning of another index. Out-of-range and repeated indices
    /// are ignored. Returns the number of rows actually removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut write_row = ROWS;

        for read_row in (0..ROWS).rev() {
            if rows.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * COLS;
                self.cells.copy_within(src..src + COLS, write_row * COLS);
            }
        }

        // write_row is now the number of removed rows.
        self.cells[..write_row * COLS].fill(EMPTY);
        write_row
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Copy the grid into a 2D array without allocating
    pub fn write_grid(&self, out: &mut Grid) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
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
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(19, 9), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(20, 0), None);
    }

    #[test]
    fn test_settle_writes_kind_value() {
        let mut board = Board::new();
        board.settle(&[(19, 0), (19, 1), (18, 0), (18, 1)], 1);

        assert_eq!(board.cell_at(19, 0), Some(1));
        assert_eq!(board.cell_at(18, 1), Some(1));
        assert_eq!(board.cells[19 * 10], 1);
        assert_eq!(board.cell_at(17, 0), Some(0));
    }

    #[test]
    fn test_clear_rows_non_adjacent() {
        let mut board = Board::new();
        // Tag every row with a distinct marker in column 0.
        for row in 0..20i8 {
            board.set(row, 0, (row % 7 + 1) as u8);
        }
        for col in 0..10 {
            board.set(5, col, 3);
            board.set(9, col, 4);
        }

        let before = board.clone();
        assert_eq!(board.clear_rows(&[5, 9]), 2);

        // Two fresh empty rows on top.
        assert!(board.rows().take(2).all(|r| r.iter().all(|&c| c == 0)));
        // Remaining rows keep their order.
        let expected: Vec<&[u8]> = before
            .rows()
            .enumerate()
            .filter(|(i, _)| *i != 5 && *i != 9)
            .map(|(_, r)| r)
            .collect();
        let actual: Vec<&[u8]> = board.rows().skip(2).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_clear_rows_ignores_duplicates_and_out_of_range() {
        let mut board = Board::new();
        for col in 0..10 {
            board.set(19, col, 2);
        }
        assert_eq!(board.clear_rows(&[19, 19, 42]), 1);
        assert!(board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_write_grid_matches_cells() {
        let mut board = Board::new();
        board.set(5, 3, 1);
        board.set(10, 7, 6);

        let mut grid: Grid = [[9; 10]; 20];
        board.write_grid(&mut grid);

        assert_eq!(grid[5][3], 1);
        assert_eq!(grid[10][7], 6);
        assert_eq!(grid.iter().flatten().filter(|&&c| c != 0).count(), 2);
    }
}
