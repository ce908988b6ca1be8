//! Immutable content catalogs.
//!
//! Items, locations, and enemy archetypes are engine-external registries
//! built once at startup and referenced by id. The simulation never embeds
//! content literals; the default sets below are the data the shipped game
//! (and the test suite) runs on.
//!
//! `BTreeMap` keeps id iteration order stable, which the loot generator
//! relies on for deterministic uniform picks under a seeded RNG.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enemy::{AnimalType, CreatureType, Enemy, EnemyKind};
use crate::error::{CoreError, CoreResult};
use crate::item::{DamageType, EffectTag, ItemKind, ItemTemplate};
use crate::location::Location;

/// Id-keyed registry of item templates.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    templates: BTreeMap<String, ItemTemplate>,
}

impl ItemCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, keyed by its id.
    pub fn insert(&mut self, template: ItemTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> CoreResult<&ItemTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| CoreError::UnknownItem(id.to_string()))
    }

    /// All templates of a kind, in stable id order.
    pub fn of_kind(&self, kind: ItemKind) -> Vec<&ItemTemplate> {
        self.templates.values().filter(|t| t.kind == kind).collect()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The default item set.
    pub fn default_set() -> Self {
        let mut c = Self::new();
        // Weapons
        c.insert(
            ItemTemplate::weapon("kitchen_knife", "Kitchen Knife", 10, DamageType::Blade)
                .with_durability(15),
        );
        c.insert(
            ItemTemplate::weapon("bat", "Baseball Bat", 12, DamageType::Blunt).with_durability(20),
        );
        c.insert(
            ItemTemplate::weapon("machete", "Machete", 18, DamageType::Blade)
                .with_durability(25)
                .with_effect(EffectTag::Rend)
                .with_effect_duration(3),
        );
        c.insert(
            ItemTemplate::weapon("spear", "Hunting Spear", 16, DamageType::Piercing)
                .with_durability(20)
                .with_reach(),
        );
        c.insert(
            ItemTemplate::weapon("stun_baton", "Stun Baton", 14, DamageType::Blunt)
                .with_durability(15)
                .with_effect(EffectTag::Stun)
                .with_effect_duration(2),
        );
        c.insert(
            ItemTemplate::weapon("pistol", "9mm Pistol", 22, DamageType::Ballistic)
                .with_durability(60)
                .with_ammo("pistol_rounds", 8),
        );
        c.insert(
            ItemTemplate::weapon("crossbow", "Crossbow", 26, DamageType::Piercing)
                .with_durability(40)
                .with_ammo("bolt", 1)
                .with_effect(EffectTag::BoltRecovery),
        );
        c.insert(
            ItemTemplate::weapon("molotov", "Molotov Cocktail", 20, DamageType::Fire)
                .with_burst(10, true)
                .with_effect(EffectTag::AreaBurst)
                .with_effect(EffectTag::Burn)
                .with_effect_duration(3),
        );
        c.insert(
            ItemTemplate::weapon("acid_flask", "Acid Flask", 15, DamageType::Chemical)
                .with_burst(5, true)
                .with_effect(EffectTag::AreaBurst)
                .with_effect(EffectTag::Acid)
                .with_effect_duration(3),
        );
        // Ammo
        c.insert(ItemTemplate::ammo("pistol_rounds", "9mm Rounds", 8));
        c.insert(ItemTemplate::ammo("bolt", "Crossbow Bolt", 4));
        // Food
        c.insert(ItemTemplate::food("beans", "Canned Beans", 30, 5));
        c.insert(ItemTemplate::food("jerky", "Dried Jerky", 25, 0));
        c.insert(ItemTemplate::food("soup", "Canned Soup", 20, 15));
        c.insert(ItemTemplate::food("water_bottle", "Bottled Water", 0, 40).with_stack(2));
        // Medical
        c.insert(ItemTemplate::medical("bandage", "Bandage", 10).with_cures(true, false));
        c.insert(ItemTemplate::medical("antibiotics", "Antibiotics", 5).with_cures(false, true));
        c.insert(
            ItemTemplate::medical("first_aid_kit", "First Aid Kit", 40)
                .with_cures(true, true)
                .with_splint(),
        );
        c.insert(ItemTemplate::medical("splint", "Splint", 0).with_splint());
        // Materials
        c.insert(ItemTemplate::material("scrap", "Scrap Metal").with_stack(2));
        c.insert(ItemTemplate::material("cloth", "Cloth Strips").with_stack(2));
        c.insert(ItemTemplate::material("chemicals", "Chemicals"));
        c.insert(ItemTemplate::material("fuel", "Fuel Canister"));
        // Location exclusives
        c.insert(
            ItemTemplate::medical("surgeon_kit", "Surgeon's Kit", 60)
                .with_cures(true, true)
                .with_splint()
                .with_exclusive(),
        );
        c.insert(
            ItemTemplate::weapon("service_rifle", "Service Rifle", 30, DamageType::Ballistic)
                .with_durability(80)
                .with_ammo("pistol_rounds", 10)
                .with_exclusive(),
        );
        c
    }
}

/// Id-keyed registry of locations.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    locations: BTreeMap<String, Location>,
}

impl LocationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a location, keyed by its id.
    pub fn insert(&mut self, location: Location) {
        self.locations.insert(location.id.clone(), location);
    }

    /// Look up a location by id.
    pub fn get(&self, id: &str) -> CoreResult<&Location> {
        self.locations
            .get(id)
            .ok_or_else(|| CoreError::UnknownLocation(id.to_string()))
    }

    /// All locations in stable id order.
    pub fn all(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The default map.
    pub fn default_set() -> Self {
        let mut c = Self::new();
        c.insert(
            Location::new("camp", "Roadside Camp", 0, 0.1)
                .with_resources(3, 3, 1, 1)
                .with_sleep_safety(0.9),
        );
        c.insert(
            Location::new("suburbs", "Abandoned Suburbs", 2, 0.3)
                .with_resources(4, 3, 1, 2)
                .with_sleep_safety(0.6),
        );
        c.insert(
            Location::new("forest", "Pine Forest", 2, 0.35)
                .with_resources(3, 5, 1, 0)
                .with_animal_weight(0.55)
                .with_sleep_safety(0.5),
        );
        c.insert(
            Location::new("supermarket", "Looted Supermarket", 3, 0.4)
                .with_resources(8, 2, 1, 1)
                .with_sleep_safety(0.4),
        );
        c.insert(
            Location::new("hospital", "St. Jude Hospital", 4, 0.5)
                .with_resources(1, 2, 1, 8)
                .with_special("surgeon_kit", 0.08)
                .with_sleep_safety(0.35),
        );
        c.insert(
            Location::new("police_station", "Police Station", 4, 0.45)
                .with_resources(1, 2, 6, 1)
                .with_survivor_weight(0.3)
                .with_sleep_safety(0.45),
        );
        c.insert(
            Location::new("downtown", "Downtown Ruins", 5, 0.55)
                .with_resources(2, 4, 3, 2)
                .with_sleep_safety(0.2)
                .with_boss_lair(),
        );
        c.insert(
            Location::new("military_base", "Overrun Military Base", 6, 0.6)
                .with_resources(1, 3, 7, 2)
                .with_special("service_rifle", 0.06)
                .with_sleep_safety(0.25)
                .with_boss_lair(),
        );
        c
    }
}

/// A creature spawn profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureArchetype {
    /// The species this profile spawns.
    pub species: CreatureType,
    /// Display name.
    pub name: String,
    /// Spawn health.
    pub health: u32,
    /// Spawn damage.
    pub damage: u32,
    /// Spawn speed (0-5).
    pub speed: u32,
    /// Weakness, if any.
    pub weakness: Option<DamageType>,
    /// Resistance, if any.
    pub resistance: Option<DamageType>,
    /// Hunts in groups.
    pub pack: bool,
    /// Strikes from ambush.
    pub ambush: bool,
}

/// An animal spawn profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalArchetype {
    /// The species this profile spawns.
    pub species: AnimalType,
    /// Display name.
    pub name: String,
    /// Spawn health.
    pub health: u32,
    /// Spawn damage.
    pub damage: u32,
    /// Spawn speed (0-5).
    pub speed: u32,
    /// Hunts in groups.
    pub pack: bool,
    /// Minimum location danger for this animal to appear.
    pub min_danger: u32,
}

/// Registry of enemy spawn profiles.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    creatures: Vec<CreatureArchetype>,
    animals: Vec<AnimalArchetype>,
}

impl Bestiary {
    /// Create an empty bestiary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creature profile.
    pub fn add_creature(&mut self, archetype: CreatureArchetype) {
        self.creatures.push(archetype);
    }

    /// Register an animal profile.
    pub fn add_animal(&mut self, archetype: AnimalArchetype) {
        self.animals.push(archetype);
    }

    /// Animal profiles reachable at the given danger level.
    pub fn animals_at(&self, danger: u32) -> Vec<&AnimalArchetype> {
        self.animals
            .iter()
            .filter(|a| a.min_danger <= danger)
            .collect()
    }

    /// Spawn a creature of the given species, falling back to the weakest
    /// registered profile when the species has none.
    pub fn spawn_creature(&self, species: CreatureType) -> Option<Enemy> {
        let archetype = self
            .creatures
            .iter()
            .find(|c| c.species == species)
            .or_else(|| self.creatures.iter().min_by_key(|c| c.species))?;
        let mut enemy = Enemy::new(
            EnemyKind::Creature {
                species: archetype.species,
            },
            &archetype.name,
            archetype.health,
            archetype.damage,
            archetype.speed,
        );
        enemy.weakness = archetype.weakness;
        enemy.resistance = archetype.resistance;
        enemy.pack = archetype.pack;
        enemy.ambush = archetype.ambush;
        Some(enemy)
    }

    /// Spawn an animal of the given species.
    pub fn spawn_animal(&self, species: AnimalType) -> Option<Enemy> {
        let archetype = self.animals.iter().find(|a| a.species == species)?;
        let mut enemy = Enemy::new(
            EnemyKind::Animal {
                species: archetype.species,
            },
            &archetype.name,
            archetype.health,
            archetype.damage,
            archetype.speed,
        );
        enemy.pack = archetype.pack;
        Some(enemy)
    }

    /// The default spawn tables.
    pub fn default_set() -> Self {
        let mut b = Self::new();
        b.add_creature(CreatureArchetype {
            species: CreatureType::Walker,
            name: "Walker".to_string(),
            health: 30,
            damage: 8,
            speed: 1,
            weakness: None,
            resistance: None,
            pack: false,
            ambush: false,
        });
        b.add_creature(CreatureArchetype {
            species: CreatureType::Runner,
            name: "Runner".to_string(),
            health: 22,
            damage: 10,
            speed: 4,
            weakness: None,
            resistance: None,
            pack: false,
            ambush: false,
        });
        b.add_creature(CreatureArchetype {
            species: CreatureType::Screamer,
            name: "Screamer".to_string(),
            health: 25,
            damage: 9,
            speed: 2,
            weakness: None,
            resistance: None,
            pack: true,
            ambush: false,
        });
        b.add_creature(CreatureArchetype {
            species: CreatureType::Bloated,
            name: "Bloated One".to_string(),
            health: 45,
            damage: 12,
            speed: 1,
            weakness: Some(DamageType::Blade),
            resistance: Some(DamageType::Blunt),
            pack: false,
            ambush: false,
        });
        b.add_creature(CreatureArchetype {
            species: CreatureType::Stalker,
            name: "Stalker".to_string(),
            health: 28,
            damage: 14,
            speed: 3,
            weakness: None,
            resistance: None,
            pack: false,
            ambush: true,
        });
        b.add_creature(CreatureArchetype {
            species: CreatureType::Brute,
            name: "Brute".to_string(),
            health: 60,
            damage: 16,
            speed: 2,
            weakness: Some(DamageType::Fire),
            resistance: Some(DamageType::Blade),
            pack: false,
            ambush: false,
        });
        b.add_creature(CreatureArchetype {
            species: CreatureType::Hazmat,
            name: "Hazmat Shambler".to_string(),
            health: 35,
            damage: 12,
            speed: 2,
            weakness: Some(DamageType::Piercing),
            resistance: Some(DamageType::Chemical),
            pack: false,
            ambush: false,
        });
        b.add_animal(AnimalArchetype {
            species: AnimalType::FeralDog,
            name: "Feral Dog".to_string(),
            health: 18,
            damage: 7,
            speed: 3,
            pack: true,
            min_danger: 0,
        });
        b.add_animal(AnimalArchetype {
            species: AnimalType::Wolf,
            name: "Gray Wolf".to_string(),
            health: 24,
            damage: 10,
            speed: 4,
            pack: true,
            min_danger: 2,
        });
        b.add_animal(AnimalArchetype {
            species: AnimalType::Boar,
            name: "Wild Boar".to_string(),
            health: 30,
            damage: 12,
            speed: 2,
            pack: false,
            min_danger: 1,
        });
        b.add_animal(AnimalArchetype {
            species: AnimalType::Bear,
            name: "Black Bear".to_string(),
            health: 70,
            damage: 20,
            speed: 2,
            pack: false,
            min_danger: 4,
        });
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_items_resolve() {
        let c = ItemCatalog::default_set();
        assert!(c.get("machete").is_ok());
        assert!(c.get("surgeon_kit").is_ok());
        assert!(matches!(c.get("bfg9000"), Err(CoreError::UnknownItem(_))));
    }

    #[test]
    fn of_kind_is_sorted_by_id() {
        let c = ItemCatalog::default_set();
        let weapons = c.of_kind(ItemKind::Weapon);
        assert!(!weapons.is_empty());
        let ids: Vec<&str> = weapons.iter().map(|t| t.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn every_ranged_weapon_has_catalog_ammo() {
        let c = ItemCatalog::default_set();
        for w in c.of_kind(ItemKind::Weapon) {
            if let Some(ammo) = &w.ammo_id {
                assert!(c.get(ammo).is_ok(), "{} fires unknown ammo {ammo}", w.id);
            }
        }
    }

    #[test]
    fn special_items_exist_in_item_catalog() {
        let items = ItemCatalog::default_set();
        let locations = LocationCatalog::default_set();
        for l in locations.all() {
            for s in &l.special_items {
                assert!(items.get(&s.item_id).is_ok());
            }
        }
    }

    #[test]
    fn default_locations_resolve() {
        let c = LocationCatalog::default_set();
        assert!(c.get("camp").is_ok());
        assert!(c.get("military_base").is_ok());
        assert!(matches!(
            c.get("atlantis"),
            Err(CoreError::UnknownLocation(_))
        ));
    }

    #[test]
    fn every_location_has_positive_loot_weights() {
        for l in LocationCatalog::default_set().all() {
            assert!(l.resources.total() > 0, "{} has no loot buckets", l.id);
        }
    }

    #[test]
    fn bestiary_spawns_every_species() {
        let b = Bestiary::default_set();
        for species in CreatureType::all() {
            let e = b.spawn_creature(*species).unwrap();
            assert!(e.health.max() > 0);
            assert!(e.damage > 0);
        }
    }

    #[test]
    fn bestiary_falls_back_to_weakest() {
        let mut b = Bestiary::new();
        b.add_creature(CreatureArchetype {
            species: CreatureType::Walker,
            name: "Walker".to_string(),
            health: 30,
            damage: 8,
            speed: 1,
            weakness: None,
            resistance: None,
            pack: false,
            ambush: false,
        });
        let e = b.spawn_creature(CreatureType::Brute).unwrap();
        assert!(matches!(
            e.kind,
            EnemyKind::Creature {
                species: CreatureType::Walker
            }
        ));
    }

    #[test]
    fn animals_filtered_by_danger() {
        let b = Bestiary::default_set();
        let low = b.animals_at(0);
        assert!(low.iter().all(|a| a.min_danger == 0));
        let high = b.animals_at(6);
        assert!(high.len() > low.len());
    }
}
