//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{types, core, input, term}`
//! and carries the pieces of the terminal binary that touch the outside
//! world: environment configuration and on-disk persistence.

pub mod config;
pub mod persist;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
