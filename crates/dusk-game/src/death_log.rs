//! The append-only death log.
//!
//! Hardcore deaths are permanent, so they get a permanent record: one JSON
//! line per death, appended and never rewritten. Separate from the save
//! slots on purpose; deleting a save does not touch the graveyard.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dusk_core::PlayerState;

use crate::error::GameResult;

/// File name of the death log inside the save directory.
pub const DEATH_LOG_FILE: &str = "graveyard.jsonl";

/// One permadeath, as recorded forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathRecord {
    /// Character name.
    pub name: String,
    /// What ended the run.
    pub cause: String,
    /// Days survived.
    pub days_survived: u32,
    /// Level reached.
    pub level: u32,
    /// Kills scored.
    pub kills: u32,
    /// Where it happened.
    pub location: String,
    /// When it happened (wall clock).
    pub timestamp: DateTime<Utc>,
}

impl DeathRecord {
    /// Build a record from the final state of a run.
    pub fn from_state(state: &PlayerState, cause: &str) -> Self {
        Self {
            name: state.name.clone(),
            cause: cause.to_string(),
            days_survived: state.days_survived,
            level: state.level,
            kills: state.kills,
            location: state.location.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Append a record to the log, creating it on first death.
pub fn append(dir: &Path, record: &DeathRecord) -> GameResult<()> {
    fs::create_dir_all(dir)?;
    let line = serde_json::to_string(record)
        .map_err(|e| crate::error::GameError::Io(std::io::Error::other(e)))?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(DEATH_LOG_FILE))?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Read every readable record. A missing log is just an empty graveyard;
/// damaged lines are skipped rather than poisoning the rest.
pub fn read_all(dir: &Path) -> GameResult<Vec<DeathRecord>> {
    let path = dir.join(DEATH_LOG_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect())
}
