//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, making them usable
//! from the rules engine, the terminal front-end and any external transport.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: row 0, column 3 (origin of the piece's 4x4 frame)
//!
//! Coordinates are always `(row, col)`.
//!
//! # Drop Timing
//!
//! The drop interval shrinks geometrically with the level:
//!
//! ```text
//! interval = max(10, round(80 + 800 * 0.75^(level - 1)))
//! ```
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 880ms |
//! | 2 | 680ms |
//! | 3 | 530ms |
//! | 5 | 333ms |
//! | 10 | 140ms |
//!
//! While fast-forward (held soft drop) is active the interval is fixed at 80ms.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.cell_value(), 5);
//! assert_eq!(PieceKind::from_cell_value(5), Some(piece));
//!
//! assert_eq!(GameMode::from_str("versus"), Some(GameMode::Versus));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row of the spawn frame origin
pub const SPAWN_ROW: i8 = 0;

/// Column of the spawn frame origin (horizontally centered)
pub const SPAWN_COL: i8 = 3;

/// Side length of the square frame every rotation state lives in
pub const FRAME_SIZE: i8 = 4;

/// Front-end frame step in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Asymptotic floor of the level curve
pub const DROP_FLOOR_MS: f64 = 80.0;

/// Level-1 span above the floor
pub const DROP_SPAN_MS: f64 = 800.0;

/// Geometric decay of the span per level
pub const DROP_DECAY: f64 = 0.75;

/// Absolute minimum drop interval
pub const DROP_INTERVAL_MIN_MS: u32 = 10;

/// Drop interval while fast-forward is held, regardless of level
pub const FAST_FORWARD_INTERVAL_MS: u32 = 80;

/// Terminals without key-release events end fast-forward after this long
/// without a key repeat.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Points per cleared row, multiplied by the current level
pub const POINTS_PER_ROW: u32 = 10;

/// Level threshold step: level `n` ends at `(n + 1) * LEVEL_STEP * n` points
pub const LEVEL_STEP: u32 = 100;

/// First level of every run
pub const START_LEVEL: u32 = 1;

/// A cell on the board: 0 = empty, 1..=7 = settled piece kind (index + 1)
pub type Cell = u8;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// The seven tetromino piece kinds
///
/// Declaration order is significant: the settled cell value of a kind is its
/// position in this list plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    T,
    L,
    J,
}

impl PieceKind {
    /// All kinds in cell-value order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Zero-based position in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Value written into the board when this kind settles (1..=7)
    pub fn cell_value(self) -> Cell {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]; `None` for empty or unknown values
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_cell_value(1), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_cell_value(7), Some(PieceKind::J));
    /// assert_eq!(PieceKind::from_cell_value(0), None);
    /// assert_eq!(PieceKind::from_cell_value(8), None);
    /// ```
    pub fn from_cell_value(value: Cell) -> Option<Self> {
        match value {
            1..=7 => Some(Self::ALL[value as usize - 1]),
            _ => None,
        }
    }
}

/// Lifecycle of one game run
///
/// `Idle -> Running <-> Paused`, `Running -> Over`. `Over` is terminal until a
/// restart builds a fresh game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    Over,
}

/// Single-player keeps a local high score; versus broadcasts score and
/// game-over to the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Single,
    Versus,
}

impl GameMode {
    /// Parse mode from string (case-insensitive). "double" is accepted as an
    /// alias for versus.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(GameMode::Single),
            "versus" | "double" => Some(GameMode::Versus),
            _ => None,
        }
    }
}

/// Player-facing actions
///
/// Input collaborators translate raw key/touch events into these and hand
/// them to the game without needing to know its current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Advance the rotation state by one
    Rotate,
    /// Drop to the lowest legal row and land immediately
    HardDrop,
    /// Begin fast-forward (soft drop held)
    SoftDropPress,
    /// End fast-forward
    SoftDropRelease,
    /// Start an idle game, otherwise toggle pause
    StartPause,
    /// Throw away the current run and return to idle
    Restart,
}
