//! Scoring module - score increments and level thresholds
//!
//! A clear is worth `rows * level * 10`. Level `n` is left once the score
//! reaches `(n + 1) * 100 * n`; the check repeats, so one large award can
//! climb several levels at once. No combo or back-to-back bonuses.

use crate::types::{LEVEL_STEP, POINTS_PER_ROW};

/// Score delta for clearing `cleared` rows at `level`
pub fn award(level: u32, cleared: usize) -> u32 {
    (cleared as u32)
        .saturating_mul(level)
        .saturating_mul(POINTS_PER_ROW)
}

/// Score at which `level` advances to `level + 1`
pub fn level_threshold(level: u32) -> u32 {
    level
        .saturating_add(1)
        .saturating_mul(LEVEL_STEP)
        .saturating_mul(level)
}

/// Level after re-checking the threshold until it no longer holds
pub fn recompute_level(score: u32, level: u32) -> u32 {
    let mut level = level;
    while score >= level_threshold(level) && level_threshold(level) < u32::MAX {
        level += 1;
    }
    level
}

/// New best score, if `final_score` beats `prior`
pub fn updated_high_score(prior: u32, final_score: u32) -> Option<u32> {
    (final_score > prior).then_some(final_score)
}
