use std::env;
use std::path::PathBuf;

use tankcombat_core::constants::FPS;

// Runtime settings (not gameplay tuning).

const DEFAULT_SEED: u64 = 42;
const DEFAULT_ENEMIES: usize = 3;
// Thirty simulated seconds.
const DEFAULT_FRAMES: u64 = 30 * FPS as u64;

/// Settings for one headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: u64,
    pub frames: u64,
    /// Map text file. `None` uses the built-in arena.
    pub map_path: Option<PathBuf>,
    pub enemies: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frames: DEFAULT_FRAMES,
            map_path: None,
            enemies: DEFAULT_ENEMIES,
        }
    }
}

impl RunConfig {
    /// Read `TANKCOMBAT_*` variables. Unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: lookup("TANKCOMBAT_SEED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed),
            frames: lookup("TANKCOMBAT_FRAMES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.frames),
            map_path: lookup("TANKCOMBAT_MAP")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            enemies: lookup("TANKCOMBAT_ENEMIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enemies),
        }
    }
}
