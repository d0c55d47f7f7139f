//! Collision checks between a piece placement and the settled board.
//!
//! Rows above the top edge (row < 0) have no backing cell. A piece may hang
//! into them, so they only count against the side walls. The floor and the
//! settled cells are checked for every row that exists.

use crate::board::Board;
use crate::catalog;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Absolute `(row, col)` cells of `kind` in `rotation` with its frame at `offset`
pub fn absolute_cells(kind: PieceKind, rotation: usize, offset: (i8, i8)) -> [(i8, i8); 4] {
    let (row, col) = offset;
    catalog::shape(kind, rotation).map(|(dr, dc)| (row + dr, col + dc))
}

/// Whether the placement is legal.
///
/// Illegal if any cell is left of column 0, right of the last column, below
/// the last row, or on a settled cell.
pub fn can_place(board: &Board, kind: PieceKind, rotation: usize, offset: (i8, i8)) -> bool {
    absolute_cells(kind, rotation, offset)
        .iter()
        .all(|&(row, col)| {
            if col < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
                return false;
            }
            row < 0 || !board.is_occupied(row, col)
        })
}

/// Top-out check for a freshly spawned piece: true iff one of its visible
/// cells (row >= 0) already holds a settled block.
pub fn spawn_blocked(board: &Board, kind: PieceKind, rotation: usize, offset: (i8, i8)) -> bool {
    absolute_cells(kind, rotation, offset)
        .iter()
        .any(|&(row, col)| row >= 0 && board.is_occupied(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_walls_and_floor() {
        let board = Board::new();
        // O occupies frame columns 1..=2, rows 0..=1.
        assert!(can_place(&board, PieceKind::O, 0, (0, -1)));
        assert!(!can_place(&board, PieceKind::O, 0, (0, -2)));
        assert!(can_place(&board, PieceKind::O, 0, (0, 7)));
        assert!(!can_place(&board, PieceKind::O, 0, (0, 8)));
        assert!(can_place(&board, PieceKind::O, 0, (18, 3)));
        assert!(!can_place(&board, PieceKind::O, 0, (19, 3)));
    }

    #[test]
    fn rows_above_top_are_permitted() {
        let mut board = Board::new();
        assert!(can_place(&board, PieceKind::I, 1, (-3, 0)));

        // Occupied cells above the top cannot exist, visible ones still block.
        board.set(0, 1, 2);
        assert!(!can_place(&board, PieceKind::I, 1, (-3, 0)));
        assert!(can_place(&board, PieceKind::I, 1, (-4, 0)));
    }

    #[test]
    fn rejects_settled_cells() {
        let mut board = Board::new();
        board.set(1, 5, 4);
        assert!(!can_place(&board, PieceKind::O, 0, (0, 3)));
        assert!(can_place(&board, PieceKind::O, 0, (0, 2)));
    }

    #[test]
    fn spawn_blocked_only_counts_visible_occupied_cells() {
        let mut board = Board::new();
        assert!(!spawn_blocked(&board, PieceKind::T, 0, (0, 3)));
        // Out of bounds at the side is not a top-out.
        assert!(!spawn_blocked(&board, PieceKind::T, 0, (0, 9)));

        board.set(0, 4, 1);
        assert!(spawn_blocked(&board, PieceKind::T, 0, (0, 3)));
        assert!(!spawn_blocked(&board, PieceKind::T, 0, (-2, 3)));
    }
}
