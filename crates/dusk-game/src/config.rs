//! Configuration for a game session.

use std::path::PathBuf;

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for a reproducible run.
    pub seed: u64,
    /// Hardcore ruleset: permadeath, tighter caps, extra status effects.
    pub hardcore: bool,
    /// Directory holding save slots and the death log.
    pub save_dir: PathBuf,
    /// Event log capacity (0 = unlimited).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hardcore: false,
            save_dir: PathBuf::from("saves"),
            max_events: 256,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable the hardcore ruleset.
    pub fn with_hardcore(mut self, hardcore: bool) -> Self {
        self.hardcore = hardcore;
        self
    }

    /// Set the save directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Set the event log capacity (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, 42);
        assert!(!cfg.hardcore);
        assert_eq!(cfg.save_dir, PathBuf::from("saves"));
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(7)
            .with_hardcore(true)
            .with_save_dir("/tmp/run")
            .with_max_events(32);
        assert_eq!(cfg.seed, 7);
        assert!(cfg.hardcore);
        assert_eq!(cfg.save_dir, PathBuf::from("/tmp/run"));
        assert_eq!(cfg.max_events, 32);
    }
}
