//! Terminal presentation module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout frameworks and instead renders into a simple framebuffer
//! that is flushed to the terminal with crossterm.
//!
//! - Reads the core only through `GameSnapshot`
//! - Runs the row-clear sweep and reports completion back to the host
//! - 2 chars wide per board cell to keep blocks roughly square

pub mod clear_animation;
pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clear_animation::{ClearAnimation, SWEEP_FRAMES};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use palette::{Flavor, Palette};
pub use renderer::{encode_diff_into, encode_full_into, FrameKey, TerminalRenderer};
