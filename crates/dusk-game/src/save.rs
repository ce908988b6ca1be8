//! Save slots.
//!
//! Each slot is an independent JSON file carrying a small flat header (the
//! minimal required fields) plus the full player state. Loading validates
//! the header fields on the raw JSON before deserializing, so a truncated
//! or hand-mangled file is rejected without touching the live state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dusk_core::PlayerState;

use crate::error::{GameError, GameResult};

/// Number of save slots.
pub const SLOT_COUNT: u32 = 5;
/// Current save format version.
pub const SAVE_VERSION: u32 = 1;
/// Fields every loadable save must carry at the top level.
pub const REQUIRED_FIELDS: &[&str] = &["name", "health", "max_health", "stamina", "location"];

/// One persisted slot on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Save format version.
    pub version: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Character name.
    pub name: String,
    /// Health at save time.
    pub health: u32,
    /// Maximum health at save time.
    pub max_health: u32,
    /// Stamina at save time.
    pub stamina: u32,
    /// Location id at save time.
    pub location: String,
    /// Hardcore ruleset flag.
    pub hardcore: bool,
    /// Level at save time.
    pub level: u32,
    /// Days survived at save time.
    pub days_survived: u32,
    /// The full player state.
    pub state: PlayerState,
}

/// Listing metadata for an occupied slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotInfo {
    /// Slot number (1-based).
    pub slot: u32,
    /// Character name.
    pub name: String,
    /// Character level.
    pub level: u32,
    /// Days survived.
    pub days_survived: u32,
    /// Hardcore ruleset flag.
    pub hardcore: bool,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
}

/// Whether a save went through or needs the caller to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The slot was written.
    Saved,
    /// The slot is occupied; call again with overwrite confirmed.
    NeedsConfirmation,
}

fn slot_path(dir: &Path, slot: u32) -> PathBuf {
    dir.join(format!("slot_{slot}.json"))
}

/// Reject slot numbers outside `1..=SLOT_COUNT`.
pub fn validate_slot(slot: u32) -> GameResult<()> {
    if (1..=SLOT_COUNT).contains(&slot) {
        Ok(())
    } else {
        Err(GameError::InvalidSlot(slot))
    }
}

/// Write `state` into a slot.
///
/// An occupied slot is only overwritten when `overwrite` is set; otherwise
/// the call reports [`SaveOutcome::NeedsConfirmation`] and writes nothing.
pub fn save(
    dir: &Path,
    slot: u32,
    state: &PlayerState,
    overwrite: bool,
) -> GameResult<SaveOutcome> {
    validate_slot(slot)?;
    let path = slot_path(dir, slot);
    if path.exists() && !overwrite {
        return Ok(SaveOutcome::NeedsConfirmation);
    }
    fs::create_dir_all(dir)?;
    let file = SaveFile {
        version: SAVE_VERSION,
        saved_at: Utc::now(),
        name: state.name.clone(),
        health: state.health.value(),
        max_health: state.health.max(),
        stamina: state.stamina.value(),
        location: state.location.clone(),
        hardcore: state.hardcore,
        level: state.level,
        days_survived: state.days_survived,
        state: state.clone(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| GameError::Io(std::io::Error::other(e)))?;
    fs::write(&path, json)?;
    Ok(SaveOutcome::Saved)
}

/// Load the player state from a slot.
///
/// Fails closed: a missing file is [`GameError::EmptySlot`], anything
/// unparsable or missing a required field is [`GameError::CorruptSave`],
/// and in neither case does the caller's state change.
pub fn load(dir: &Path, slot: u32) -> GameResult<PlayerState> {
    validate_slot(slot)?;
    let path = slot_path(dir, slot);
    if !path.exists() {
        return Err(GameError::EmptySlot(slot));
    }
    let text = fs::read_to_string(&path)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| GameError::CorruptSave {
            slot,
            reason: format!("not valid JSON: {e}"),
        })?;
    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(GameError::CorruptSave {
                slot,
                reason: format!("missing required field '{field}'"),
            });
        }
    }
    let file: SaveFile = serde_json::from_value(value).map_err(|e| GameError::CorruptSave {
        slot,
        reason: format!("malformed save: {e}"),
    })?;
    Ok(file.state)
}

/// List every occupied, readable slot.
pub fn list_slots(dir: &Path) -> GameResult<Vec<SlotInfo>> {
    let mut slots = Vec::new();
    for slot in 1..=SLOT_COUNT {
        let path = slot_path(dir, slot);
        if !path.exists() {
            continue;
        }
        let Ok(text) = fs::read_to_string(&path) else {
            continue;
        };
        let Ok(file) = serde_json::from_str::<SaveFile>(&text) else {
            continue;
        };
        slots.push(SlotInfo {
            slot,
            name: file.name,
            level: file.level,
            days_survived: file.days_survived,
            hardcore: file.hardcore,
            saved_at: file.saved_at,
        });
    }
    Ok(slots)
}

/// Delete a slot. Returns whether a file was removed.
pub fn delete(dir: &Path, slot: u32) -> GameResult<bool> {
    validate_slot(slot)?;
    let path = slot_path(dir, slot);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_state() -> PlayerState {
        let mut state = PlayerState::new("Ash", "camp", true);
        state.gain_xp(150);
        state.kills = 4;
        state.status.insanity = 25;
        state.hours_elapsed = 30.5;
        state.days_survived = 1;
        state
    }

    #[test]
    fn save_load_roundtrip_is_field_for_field() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        assert_eq!(
            save(dir.path(), 1, &state, false).unwrap(),
            SaveOutcome::Saved
        );
        let loaded = load(dir.path(), 1).unwrap();
        assert_eq!(state, loaded);
    }

    #[test]
    fn occupied_slot_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        save(dir.path(), 2, &state, false).unwrap();
        assert_eq!(
            save(dir.path(), 2, &state, false).unwrap(),
            SaveOutcome::NeedsConfirmation
        );
        assert_eq!(
            save(dir.path(), 2, &state, true).unwrap(),
            SaveOutcome::Saved
        );
    }

    #[test]
    fn slot_numbers_are_validated() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        assert!(matches!(
            save(dir.path(), 0, &state, false),
            Err(GameError::InvalidSlot(0))
        ));
        assert!(matches!(
            save(dir.path(), SLOT_COUNT + 1, &state, false),
            Err(GameError::InvalidSlot(_))
        ));
        assert!(matches!(load(dir.path(), 0), Err(GameError::InvalidSlot(0))));
    }

    #[test]
    fn empty_slot_reported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load(dir.path(), 3), Err(GameError::EmptySlot(3))));
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        fs::write(slot_path(dir.path(), 1), "{ not json").unwrap();
        assert!(matches!(
            load(dir.path(), 1),
            Err(GameError::CorruptSave { slot: 1, .. })
        ));
    }

    #[test]
    fn missing_required_field_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        save(dir.path(), 1, &state, false).unwrap();
        // Strip a required field from the written JSON.
        let path = slot_path(dir.path(), 1);
        let mut value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("health");
        fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let err = load(dir.path(), 1).unwrap_err();
        match err {
            GameError::CorruptSave { slot, reason } => {
                assert_eq!(slot, 1);
                assert!(reason.contains("health"));
            }
            other => panic!("expected corrupt save, got {other}"),
        }
    }

    #[test]
    fn truncated_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        save(dir.path(), 1, &state, false).unwrap();
        let path = slot_path(dir.path(), 1);
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, &text[..text.len() / 2]).unwrap();
        assert!(matches!(
            load(dir.path(), 1),
            Err(GameError::CorruptSave { .. })
        ));
    }

    #[test]
    fn list_slots_skips_empty_and_corrupt() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        save(dir.path(), 1, &state, false).unwrap();
        save(dir.path(), 4, &state, false).unwrap();
        fs::write(slot_path(dir.path(), 3), "garbage").unwrap();

        let slots = list_slots(dir.path()).unwrap();
        let numbers: Vec<u32> = slots.iter().map(|s| s.slot).collect();
        assert_eq!(numbers, vec![1, 4]);
        assert_eq!(slots[0].name, "Ash");
        assert!(slots[0].hardcore);
        assert_eq!(slots[0].level, 2);
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let state = sample_state();
        save(dir.path(), 5, &state, false).unwrap();
        assert!(delete(dir.path(), 5).unwrap());
        assert!(!delete(dir.path(), 5).unwrap());
        assert!(matches!(load(dir.path(), 5), Err(GameError::EmptySlot(5))));
    }

    #[test]
    fn slots_are_independent() {
        let dir = TempDir::new().unwrap();
        let a = sample_state();
        let mut b = PlayerState::new("Rook", "forest", false);
        b.days_survived = 9;
        save(dir.path(), 1, &a, false).unwrap();
        save(dir.path(), 2, &b, false).unwrap();
        delete(dir.path(), 1).unwrap();
        let loaded = load(dir.path(), 2).unwrap();
        assert_eq!(loaded.name, "Rook");
    }
}
