//! Soft-drop release emulation for terminals without key-release events.
//!
//! Most terminals only report presses, repeating them while a key is held.
//! [`SoftDropGrace`] treats the soft-drop key as held for as long as repeats
//! keep arriving, and reports a release once none has arrived for the grace
//! period. When real release events show up it steps aside.

use crate::types::{GameAction, SOFT_DROP_GRACE_MS};

#[derive(Debug, Clone)]
pub struct SoftDropGrace {
    held: bool,
    since_last_press_ms: u32,
    grace_ms: u32,
    /// Set once the terminal has delivered a real release event
    release_events_seen: bool,
}

impl SoftDropGrace {
    pub fn new() -> Self {
        Self::with_grace_ms(SOFT_DROP_GRACE_MS)
    }

    pub fn with_grace_ms(grace_ms: u32) -> Self {
        Self {
            held: false,
            since_last_press_ms: 0,
            grace_ms,
            release_events_seen: false,
        }
    }

    /// Feed a mapped action. Returns the action to apply, or `None` for a key
    /// repeat of an already-held soft drop.
    pub fn filter(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::SoftDropPress => {
                self.since_last_press_ms = 0;
                if self.held {
                    None
                } else {
                    self.held = true;
                    Some(action)
                }
            }
            GameAction::SoftDropRelease => {
                self.release_events_seen = true;
                self.held = false;
                Some(action)
            }
            other => Some(other),
        }
    }

    /// Advance the grace clock. Returns `SoftDropRelease` once the held key
    /// has gone quiet for longer than the grace period.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.held || self.release_events_seen {
            return None;
        }
        self.since_last_press_ms = self.since_last_press_ms.saturating_add(elapsed_ms);
        if self.since_last_press_ms > self.grace_ms {
            self.held = false;
            self.since_last_press_ms = 0;
            return Some(GameAction::SoftDropRelease);
        }
        None
    }
}

impl Default for SoftDropGrace {
    fn default() -> Self {
        Self::new()
    }
}
