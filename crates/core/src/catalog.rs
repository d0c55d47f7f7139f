//! Pieces module - tetromino rotation states
//!
//! Every kind owns a fixed, ordered list of rotation states. A state is four
//! `(row, col)` offsets inside a 4x4 frame whose origin is the piece's board
//! offset. There is no kick table: a rotation either fits in place or is
//! rejected.

use crate::types::PieceKind;

/// Offset of a single mino relative to the frame origin, `(row, col)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the frame origin
pub type PieceShape = [MinoOffset; 4];

const O_STATES: [PieceShape; 1] = [[(0, 1), (0, 2), (1, 1), (1, 2)]];

const I_STATES: [PieceShape; 2] = [
    // horizontal, top row of the frame
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    // vertical, second column
    [(0, 1), (1, 1), (2, 1), (3, 1)],
];

const S_STATES: [PieceShape; 2] = [
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
];

const Z_STATES: [PieceShape; 2] = [
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 1), (1, 0), (1, 1), (2, 0)],
];

const T_STATES: [PieceShape; 4] = [
    // flat side up, nose pointing down
    [(0, 0), (0, 1), (0, 2), (1, 1)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 1)],
];

const L_STATES: [PieceShape; 4] = [
    [(0, 2), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(0, 0), (0, 1), (0, 2), (1, 0)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 1), (1, 1), (2, 0), (2, 1)],
];

/// All rotation states of a kind, in rotation order
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::O => &O_STATES,
        PieceKind::I => &I_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
    }
}

/// Number of distinct rotation states (1, 2 or 4)
pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Get the shape for a kind and rotation index.
///
/// The index is reduced modulo the kind's state count, so callers holding an
/// already-wrapped index get exactly that state.
pub fn shape(kind: PieceKind, rotation: usize) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation % states.len()]
}

/// Rotation index reached from `current` after `step` quarter turns.
///
/// Always in `0..rotation_count(kind)`, also for negative steps.
pub fn wrap_rotation(kind: PieceKind, current: usize, step: i32) -> usize {
    let count = rotation_count(kind) as i64;
    (current as i64 + step as i64).rem_euclid(count) as usize
}
