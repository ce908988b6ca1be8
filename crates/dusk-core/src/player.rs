//! The player aggregate.
//!
//! `PlayerState` is the single mutable value the whole simulation operates
//! on. Core functions take it explicitly; there are no ambient singletons.

use serde::{Deserialize, Serialize};

use crate::companion::{Companion, MAX_ACTIVE_COMPANIONS};
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::mission::Mission;
use crate::stat::Stat;
use crate::status::StatusEffects;
use crate::weather::WeatherState;

/// Starting maximum health under standard rules.
pub const STANDARD_MAX_HEALTH: u32 = 100;
/// Starting maximum health under hardcore rules (tighter cap).
pub const HARDCORE_MAX_HEALTH: u32 = 80;
/// Starting maximum for stamina, hunger, thirst, and sleep.
pub const RESOURCE_MAX: u32 = 100;
/// Maximum health gained per level.
pub const LEVEL_HEALTH_BONUS: u32 = 10;
/// Maximum stamina gained per level.
pub const LEVEL_STAMINA_BONUS: u32 = 5;
/// Health restored on level-up.
pub const LEVEL_HEAL: u32 = 20;

/// Experience required to go from `level` to `level + 1`.
pub fn xp_to_next_level(level: u32) -> u32 {
    100 * level.max(1)
}

/// The full, persistable player state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Character name.
    pub name: String,
    /// Health; reaching 0 is terminal.
    pub health: Stat,
    /// Stamina; spent by actions, regenerated while fed and hydrated.
    pub stamina: Stat,
    /// Hunger; 0 means starving.
    pub hunger: Stat,
    /// Thirst; 0 means dehydrated.
    pub thirst: Stat,
    /// Sleep; 0 means sleep-deprived.
    pub sleep: Stat,
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Experience needed to reach the next level.
    pub experience_to_next: u32,
    /// Carried items and the equipped-weapon slot.
    pub inventory: Inventory,
    /// Catalog id of the current location.
    pub location: String,
    /// Total simulated hours since the run began.
    pub hours_elapsed: f64,
    /// Full days survived (increments every 24 elapsed hours).
    pub days_survived: u32,
    /// Total kills this run.
    pub kills: u32,
    /// Active status effects.
    pub status: StatusEffects,
    /// Current weather and its remaining duration.
    pub weather: WeatherState,
    /// Recruited companions.
    pub companions: Vec<Companion>,
    /// Hardcore ruleset: permadeath, tighter caps, extra status effects.
    pub hardcore: bool,
    /// Active and completed missions.
    pub missions: Vec<Mission>,
    /// Location ids whose unlocked boss has already been put down.
    pub bosses_slain: Vec<String>,
}

impl PlayerState {
    /// Create a fresh character at the given starting location.
    pub fn new(name: &str, start_location: &str, hardcore: bool) -> Self {
        let max_health = if hardcore {
            HARDCORE_MAX_HEALTH
        } else {
            STANDARD_MAX_HEALTH
        };
        Self {
            name: name.to_string(),
            health: Stat::full(max_health),
            stamina: Stat::full(RESOURCE_MAX),
            hunger: Stat::full(RESOURCE_MAX),
            thirst: Stat::full(RESOURCE_MAX),
            sleep: Stat::full(RESOURCE_MAX),
            level: 1,
            experience: 0,
            experience_to_next: xp_to_next_level(1),
            inventory: Inventory::new(),
            location: start_location.to_string(),
            hours_elapsed: 0.0,
            days_survived: 0,
            kills: 0,
            status: StatusEffects::default(),
            weather: WeatherState::default(),
            companions: Vec::new(),
            hardcore,
            missions: Vec::new(),
            bosses_slain: Vec::new(),
        }
    }

    /// Whether health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    /// Award experience. Returns the number of levels gained, applying the
    /// per-level stat bonuses and heal for each.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut levels = 0;
        while self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            self.experience_to_next = xp_to_next_level(self.level);
            self.health.raise_max(LEVEL_HEALTH_BONUS);
            self.stamina.raise_max(LEVEL_STAMINA_BONUS);
            self.health.restore(LEVEL_HEAL);
            levels += 1;
        }
        levels
    }

    /// Recruit a companion, enforcing the active-slot cap.
    pub fn recruit(&mut self, companion: Companion) -> CoreResult<()> {
        if self.companions.len() >= MAX_ACTIVE_COMPANIONS {
            return Err(CoreError::CompanionLimit(MAX_ACTIVE_COMPANIONS));
        }
        self.companions.push(companion);
        Ok(())
    }

    /// Dismiss the companion with the given name. Returns whether one was
    /// dismissed.
    pub fn dismiss(&mut self, name: &str) -> bool {
        let before = self.companions.len();
        self.companions.retain(|c| c.name != name);
        self.companions.len() != before
    }

    /// Advance companion injury recovery by `hours`.
    pub fn recover_companions(&mut self, hours: f64) {
        for c in &mut self.companions {
            c.recover(hours);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companion::CompanionSkill;

    #[test]
    fn hardcore_caps_are_tighter() {
        let standard = PlayerState::new("Ash", "camp", false);
        let hardcore = PlayerState::new("Ash", "camp", true);
        assert_eq!(standard.health.max(), STANDARD_MAX_HEALTH);
        assert_eq!(hardcore.health.max(), HARDCORE_MAX_HEALTH);
    }

    #[test]
    fn xp_single_level() {
        let mut p = PlayerState::new("Ash", "camp", false);
        p.health.deplete(50);
        let levels = p.gain_xp(120);
        assert_eq!(levels, 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 20);
        assert_eq!(p.experience_to_next, 200);
        assert_eq!(p.health.max(), STANDARD_MAX_HEALTH + LEVEL_HEALTH_BONUS);
        assert_eq!(p.health.value(), 70);
    }

    #[test]
    fn xp_multi_level() {
        let mut p = PlayerState::new("Ash", "camp", false);
        // 100 + 200 = 300 to reach level 3.
        let levels = p.gain_xp(310);
        assert_eq!(levels, 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.experience, 10);
        assert_eq!(p.stamina.max(), RESOURCE_MAX + 2 * LEVEL_STAMINA_BONUS);
    }

    #[test]
    fn companion_cap() {
        let mut p = PlayerState::new("Ash", "camp", false);
        p.recruit(Companion::new("Mara", 50, CompanionSkill::Combat))
            .unwrap();
        p.recruit(Companion::new("Theo", 50, CompanionSkill::Marksmanship))
            .unwrap();
        let err = p.recruit(Companion::new("Juno", 50, CompanionSkill::Explosives));
        assert!(matches!(err, Err(CoreError::CompanionLimit(_))));
        assert!(p.dismiss("Mara"));
        assert!(!p.dismiss("Mara"));
        assert!(
            p.recruit(Companion::new("Juno", 50, CompanionSkill::Explosives))
                .is_ok()
        );
    }

    #[test]
    fn companion_recovery_ticks() {
        let mut p = PlayerState::new("Ash", "camp", false);
        p.recruit(Companion::new("Mara", 50, CompanionSkill::Combat))
            .unwrap();
        p.companions[0].injure(10.0);
        p.recover_companions(10.0);
        assert!(p.companions[0].is_active());
    }

    #[test]
    fn full_state_serde_roundtrip() {
        let mut p = PlayerState::new("Ash", "camp", true);
        p.gain_xp(150);
        p.kills = 3;
        p.status.bleeding = true;
        p.status.insanity = 42;
        let json = serde_json::to_string(&p).unwrap();
        let p2: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(p, p2);
    }
}
