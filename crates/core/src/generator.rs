//! Piece generation
//!
//! [`PieceGenerator`] hands out fresh pieces at the spawn position. Which kind
//! comes next is decided by a [`KindPolicy`]; the default is uniform random
//! per call with no fairness guarantee. A 7-bag and a scripted sequence are
//! available for callers that want them.

use crate::catalog::{self, PieceShape};
use crate::rng::SimpleRng;
use crate::types::{PieceKind, SPAWN_COL, SPAWN_ROW};

/// A piece instance: kind, rotation index and the board position of its
/// frame origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index into the kind's rotation states, always already wrapped
    pub rotation: usize,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// Create a piece at the spawn position in its first rotation state
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    /// Frame-relative cells of the current rotation state
    pub fn shape(&self) -> PieceShape {
        catalog::shape(self.kind, self.rotation)
    }

    /// Absolute `(row, col)` board cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(r, c)| (self.row + r, self.col + c))
    }

    /// Frame origin as `(row, col)`
    pub fn offset(&self) -> (i8, i8) {
        (self.row, self.col)
    }
}

/// How the generator picks the next kind
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KindPolicy {
    /// Every kind equally likely on every call
    #[default]
    Uniform,
    /// Shuffled bags holding one of each kind
    Bag,
    /// Cycle through a fixed list (falls back to uniform when empty)
    Scripted(Vec<PieceKind>),
}

/// Factory for spawn-position pieces
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    policy: KindPolicy,
    rng: SimpleRng,
    bag: [PieceKind; 7],
    bag_index: usize,
    script_index: usize,
}

impl PieceGenerator {
    pub fn new(policy: KindPolicy, seed: u32) -> Self {
        Self {
            policy,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            // Forces a shuffle on the first bag draw.
            bag_index: PieceKind::ALL.len(),
            script_index: 0,
        }
    }

    /// Uniform random generator
    pub fn uniform(seed: u32) -> Self {
        Self::new(KindPolicy::Uniform, seed)
    }

    /// Produce a new piece at the spawn position with rotation 0
    pub fn generate(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }

    fn next_kind(&mut self) -> PieceKind {
        match &self.policy {
            KindPolicy::Scripted(kinds) if !kinds.is_empty() => {
                let kind = kinds[self.script_index % kinds.len()];
                self.script_index = (self.script_index + 1) % kinds.len();
                kind
            }
            KindPolicy::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.bag = PieceKind::ALL;
                    self.rng.shuffle(&mut self.bag);
                    self.bag_index = 0;
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
            KindPolicy::Uniform | KindPolicy::Scripted(_) => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
        }
    }

    /// Current RNG state, for restarting with a continued sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::uniform(1)
    }
}
