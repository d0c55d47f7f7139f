//! Drop scheduling
//!
//! [`DropScheduler`] is the single tick source of a game. It is driven by
//! elapsed time from the host loop rather than by a wall clock, so it stays
//! deterministic and trivially testable. At most one schedule is armed; a
//! restart always replaces the previous one.

use crate::types::{
    DROP_DECAY, DROP_FLOOR_MS, DROP_INTERVAL_MIN_MS, DROP_SPAN_MS, FAST_FORWARD_INTERVAL_MS,
};

/// Drop interval in milliseconds for `level`, or the fixed fast-forward
/// interval while fast-forward is held.
pub fn interval_for(level: u32, fast_forward: bool) -> u32 {
    if fast_forward {
        return FAST_FORWARD_INTERVAL_MS;
    }
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let timestep = (DROP_FLOOR_MS + DROP_SPAN_MS * DROP_DECAY.powi(exponent)).round() as u32;
    timestep.max(DROP_INTERVAL_MIN_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropScheduler {
    /// `Some(interval)` while armed
    interval_ms: Option<u32>,
    accumulated_ms: u32,
}

impl DropScheduler {
    /// A disarmed scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending schedule and arm a fresh one
    pub fn restart(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
        self.accumulated_ms = 0;
    }

    /// Disarm; no tick fires until the next restart
    pub fn cancel(&mut self) {
        self.interval_ms = None;
        self.accumulated_ms = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }

    /// Interval of the armed schedule
    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Feed `budget_ms` of elapsed time.
    ///
    /// Returns `Some(rest)` when a tick falls due, where `rest` is the part of
    /// the budget not yet consumed. The caller runs the tick and then calls
    /// again with `rest`, which lets the tick re-arm or cancel the schedule
    /// before any further tick is considered.
    pub fn consume(&mut self, budget_ms: u32) -> Option<u32> {
        let interval = self.interval_ms?;
        let needed = interval - self.accumulated_ms;
        if budget_ms >= needed {
            self.accumulated_ms = 0;
            Some(budget_ms - needed)
        } else {
            self.accumulated_ms += budget_ms;
            None
        }
    }
}
