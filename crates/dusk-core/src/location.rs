//! Location definitions.
//!
//! Locations are immutable catalog entries referenced by id; the player
//! aggregate stores only the id of wherever it currently is.

use serde::{Deserialize, Serialize};

/// Highest danger level a location can have.
pub const MAX_DANGER: u32 = 6;

/// Relative loot-bucket weights for a location.
///
/// Weights are relative, not probabilities; a bucket with weight 0 never
/// drops. At least one bucket must be positive for loot to exist at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceWeights {
    /// Weight of the food bucket.
    pub food: u32,
    /// Weight of the material bucket.
    pub material: u32,
    /// Weight of the weapon bucket.
    pub weapon: u32,
    /// Weight of the medical bucket.
    pub medical: u32,
}

impl ResourceWeights {
    /// Sum of all bucket weights.
    pub fn total(&self) -> u32 {
        self.food + self.material + self.weapon + self.medical
    }
}

impl Default for ResourceWeights {
    fn default() -> Self {
        Self {
            food: 4,
            material: 3,
            weapon: 2,
            medical: 1,
        }
    }
}

/// A location-exclusive item with its discovery chance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialFind {
    /// Catalog id of the exclusive item.
    pub item_id: String,
    /// Independent per-search discovery probability.
    pub chance: f64,
}

/// An immutable location definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Catalog key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Danger level 0-6; scales encounter odds and spawn tables.
    pub danger: u32,
    /// Base probability of an encounter per search, before danger scaling.
    pub base_encounter_chance: f64,
    /// Loot-bucket weights.
    pub resources: ResourceWeights,
    /// Override for the survivor share of encounters.
    pub survivor_weight: Option<f64>,
    /// Override for the animal share of encounters.
    pub animal_weight: Option<f64>,
    /// Location-exclusive items.
    pub special_items: Vec<SpecialFind>,
    /// 0.0 (open ground) to 1.0 (fortified); scales rest quality and
    /// the chance of sleeping undisturbed.
    pub sleep_safety: f64,
    /// Boss variants can spawn here once unlocked.
    pub boss_lair: bool,
}

impl Location {
    /// Create a location; `danger` is clamped to [`MAX_DANGER`] and
    /// `sleep_safety` to `[0, 1]`.
    pub fn new(id: &str, name: &str, danger: u32, base_encounter_chance: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            danger: danger.min(MAX_DANGER),
            base_encounter_chance: base_encounter_chance.clamp(0.0, 1.0),
            resources: ResourceWeights::default(),
            survivor_weight: None,
            animal_weight: None,
            special_items: Vec::new(),
            sleep_safety: 0.5,
            boss_lair: false,
        }
    }

    /// Set loot-bucket weights.
    pub fn with_resources(mut self, food: u32, material: u32, weapon: u32, medical: u32) -> Self {
        self.resources = ResourceWeights {
            food,
            material,
            weapon,
            medical,
        };
        self
    }

    /// Override the survivor encounter share.
    pub fn with_survivor_weight(mut self, weight: f64) -> Self {
        self.survivor_weight = Some(weight.max(0.0));
        self
    }

    /// Override the animal encounter share.
    pub fn with_animal_weight(mut self, weight: f64) -> Self {
        self.animal_weight = Some(weight.max(0.0));
        self
    }

    /// Add a location-exclusive item.
    pub fn with_special(mut self, item_id: &str, chance: f64) -> Self {
        self.special_items.push(SpecialFind {
            item_id: item_id.to_string(),
            chance: chance.clamp(0.0, 1.0),
        });
        self
    }

    /// Set how safe this place is to sleep in.
    pub fn with_sleep_safety(mut self, safety: f64) -> Self {
        self.sleep_safety = safety.clamp(0.0, 1.0);
        self
    }

    /// Mark as a potential boss lair.
    pub fn with_boss_lair(mut self) -> Self {
        self.boss_lair = true;
        self
    }
}
