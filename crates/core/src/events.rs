//! Events the core hands to its collaborators.
//!
//! The core never draws, plays audio or talks to the network. It queues
//! [`GameEvent`]s and the host drains them after each call.

use crate::board::RowList;

/// Messages for the opponent in versus mode. The transport decides the wire
/// format; with the `serde` feature these encode as
/// `{"type":"score","score":N}` and `{"type":"gameOver"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum NetEvent {
    Score { score: u32 },
    GameOver,
}

/// Audio hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Pause,
    LineClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Score or level changed; carries both for display
    ScoreChanged { score: u32, level: u32 },
    /// Start the row-clear animation, then call
    /// `GameState::on_clear_animation_complete` exactly once
    ClearAnimationRequested { rows: RowList },
    /// Versus mode only
    Broadcast(NetEvent),
    /// Entered `Over`
    GameOver { score: u32 },
    /// Single-player run ended above the prior best
    HighScore { score: u32 },
    Sound(SoundCue),
}
