//! Kill-quota missions.
//!
//! Missions track creature kills; completing one grants XP and can unlock
//! a boss encounter at a named location.

use serde::{Deserialize, Serialize};

use crate::enemy::CreatureType;

/// A kill-quota mission carried on the player state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The creature species to hunt.
    pub target: CreatureType,
    /// Kills required.
    pub required: u32,
    /// Kills recorded so far.
    pub progress: u32,
    /// Completed missions stop accumulating progress.
    pub completed: bool,
    /// XP granted on completion.
    pub reward_xp: u32,
    /// Location id where a boss becomes reachable on completion.
    pub unlocks_boss_at: Option<String>,
}

impl Mission {
    /// Create a mission.
    pub fn new(id: &str, name: &str, target: CreatureType, required: u32, reward_xp: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            target,
            required: required.max(1),
            progress: 0,
            completed: false,
            reward_xp,
            unlocks_boss_at: None,
        }
    }

    /// Completing this mission unlocks a boss at the given location.
    pub fn with_boss_unlock(mut self, location_id: &str) -> Self {
        self.unlocks_boss_at = Some(location_id.to_string());
        self
    }

    /// Record a kill of `species`. Returns true when this kill completes
    /// the mission.
    pub fn record_kill(&mut self, species: CreatureType) -> bool {
        if self.completed || species != self.target {
            return false;
        }
        self.progress += 1;
        if self.progress >= self.required {
            self.completed = true;
            return true;
        }
        false
    }
}
