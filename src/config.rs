//! Runtime configuration from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOCKFALL_SEED` | derived from the clock |
//! | `BLOCKFALL_MODE` | `single` (`versus` / `double` for two players) |
//! | `BLOCKFALL_FLAVOR` | `mocha` |
//! | `BLOCKFALL_HIGH_SCORE_PATH` | `blockfall_high_score.json`; empty disables |
//! | `BLOCKFALL_EVENT_LOG_PATH` | unset (no event log) |
//!
//! Values that do not parse fall back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{GameConfig, KindPolicy};
use crate::term::Flavor;
use crate::types::GameMode;

pub const DEFAULT_HIGH_SCORE_PATH: &str = "blockfall_high_score.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub mode: GameMode,
    pub flavor: Flavor,
    pub high_score_path: Option<PathBuf>,
    pub event_log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            mode: GameMode::Single,
            flavor: Flavor::Mocha,
            high_score_path: Some(PathBuf::from(DEFAULT_HIGH_SCORE_PATH)),
            event_log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), clock_seed())
    }

    /// Build from an arbitrary variable source. `default_seed` is used when
    /// `BLOCKFALL_SEED` is absent or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, default_seed: u32) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(default_seed);

        let mode = lookup("BLOCKFALL_MODE")
            .and_then(|s| GameMode::from_str(s.trim()))
            .unwrap_or_default();

        let flavor = lookup("BLOCKFALL_FLAVOR")
            .and_then(|s| Flavor::from_str(s.trim()))
            .unwrap_or_default();

        let high_score_path = match lookup("BLOCKFALL_HIGH_SCORE_PATH") {
            Some(s) => non_empty_path(s),
            None => Some(PathBuf::from(DEFAULT_HIGH_SCORE_PATH)),
        };

        let event_log_path = lookup("BLOCKFALL_EVENT_LOG_PATH").and_then(non_empty_path);

        Self {
            seed,
            mode,
            flavor,
            high_score_path,
            event_log_path,
        }
    }

    /// Core configuration for a run starting from `prior_high_score`
    pub fn game_config(&self, prior_high_score: u32) -> GameConfig {
        GameConfig {
            seed: self.seed,
            mode: self.mode,
            kind_policy: KindPolicy::Uniform,
            prior_high_score,
        }
    }
}

fn non_empty_path(s: String) -> Option<PathBuf> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
