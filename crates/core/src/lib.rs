//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management and the drop
//! clock. It has no dependencies on drawing, audio, networking or I/O:
//! collaborators receive [`events::GameEvent`]s and read
//! [`snapshot::GameSnapshot`]s, and feed input back through
//! [`GameState`] operations.
//!
//! - **Deterministic**: same seed and same inputs give the same game
//! - **Single-threaded**: drop ticks only fire from [`GameState::advance`]
//! - **Allocation-free hot paths**: flat board storage, fixed-size row lists
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven piece kinds and their rotation states
//! - [`generator`]: spawn-position pieces from a seeded kind policy
//! - [`board`]: 10x20 grid of settled cells with batch row clearing
//! - [`collision`]: placement legality and the top-out check
//! - [`scoring`]: per-clear awards and level thresholds
//! - [`scheduler`]: level-dependent drop interval and the tick source
//! - [`game_state`]: the run/pause/over state machine tying it all together
//!
//! # Game Rules
//!
//! - Rotation replaces the shape in place; a blocked rotation is dropped,
//!   there are no wall kicks
//! - A clear of `n` rows at level `l` scores `n * l * 10`
//! - Level `l` ends at `(l + 1) * 100 * l` points
//! - Rows clear only after the presentation layer finishes its animation
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::with_seed(12345));
//! game.apply_action(GameAction::StartPause);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The first piece has settled on the floor.
//! assert!(game.board().cells().iter().any(|&c| c != 0));
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::advance`] with elapsed milliseconds. At level
//! 1 a drop happens every 880ms, shrinking towards 80ms; holding soft drop
//! fixes the interval at 80ms.

pub mod board;
pub mod catalog;
pub mod collision;
pub mod events;
pub mod game_state;
pub mod generator;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid, RowList};
pub use collision::{can_place, spawn_blocked};
pub use events::{GameEvent, NetEvent, SoundCue};
pub use game_state::{GameConfig, GameState, EVENT_QUEUE_CAPACITY};
pub use generator::{KindPolicy, Piece, PieceGenerator};
pub use rng::SimpleRng;
pub use scheduler::{interval_for, DropScheduler};
pub use scoring::{award, recompute_level};
pub use snapshot::{GameSnapshot, PieceSnapshot};
