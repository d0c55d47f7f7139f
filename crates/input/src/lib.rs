//! Terminal input module.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`]s and emulates soft-drop releases on terminals
//! that never report them.

pub mod grace;
pub mod map;

pub use blockfall_types as types;

pub use grace::SoftDropGrace;
pub use map::{handle_key_event, handle_key_release, is_soft_drop_key, should_quit};
