use crate::board::{Grid, RowList};
use crate::generator::Piece;
use crate::types::{PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

/// A piece as the renderer sees it: kind and absolute cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            cells: value.cells(),
        }
    }
}

/// Read-only view of everything a render sink needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<PieceSnapshot>,
    /// Next piece, cells relative to the preview origin (spawn offset removed)
    pub next: Option<PieceSnapshot>,
    pub phase: Phase,
    pub fast_forward: bool,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub drop_interval_ms: u32,
    /// Rows waiting for the clear animation to finish
    pub clearing: RowList,
    pub revision: u32,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            phase: Phase::Idle,
            fast_forward: false,
            score: 0,
            level: 0,
            high_score: 0,
            drop_interval_ms: 0,
            clearing: RowList::new(),
            revision: 0,
        }
    }
}
