//! Item templates and inventory instances.
//!
//! An [`ItemTemplate`] is an immutable, id-keyed definition living in the
//! item catalog. Picking an item up copies the template into an
//! [`ItemInstance`] that carries the mutable fields (durability, loaded
//! ammo, stack count).

use serde::{Deserialize, Serialize};

/// Broad item categories, also used as loot buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Equippable in the weapon slot.
    Weapon,
    /// Consumed by ranged weapons.
    Ammo,
    /// Restores hunger (and sometimes thirst).
    Food,
    /// Restores health or cures conditions.
    Medical,
    /// Crafting input.
    Material,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Ammo => write!(f, "ammo"),
            Self::Food => write!(f, "food"),
            Self::Medical => write!(f, "medical"),
            Self::Material => write!(f, "material"),
        }
    }
}

/// The damage type a weapon deals, matched against enemy weaknesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    /// Clubs, bats, fists.
    Blunt,
    /// Knives, machetes, axes.
    Blade,
    /// Spears, bolts.
    Piercing,
    /// Firearms.
    Ballistic,
    /// Flame weapons.
    Fire,
    /// Acids and corrosives.
    Chemical,
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blunt => write!(f, "blunt"),
            Self::Blade => write!(f, "blade"),
            Self::Piercing => write!(f, "piercing"),
            Self::Ballistic => write!(f, "ballistic"),
            Self::Fire => write!(f, "fire"),
            Self::Chemical => write!(f, "chemical"),
        }
    }
}

/// A special combat behavior carried by a weapon.
///
/// The combat engine dispatches these through a tag-to-handler registry, so
/// adding a new behavior means adding a tag and a handler, not widening a
/// branch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTag {
    /// Deals secondary splash damage on hit.
    AreaBurst,
    /// Chance to stun the target.
    Stun,
    /// Chance to freeze the target.
    Freeze,
    /// Sets the target burning (damage over time).
    Burn,
    /// Corrodes the target (damage over time, weaker attacks).
    Acid,
    /// Opens a bleeding wound on the target (damage over time).
    Rend,
    /// Spent ammunition can be recovered from the corpse.
    BoltRecovery,
}

/// An immutable item definition, keyed by `id` in the item catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Catalog key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category.
    pub kind: ItemKind,
    /// Base damage (weapons only).
    pub damage: u32,
    /// Damage type (weapons only).
    pub damage_type: Option<DamageType>,
    /// Uses before the item breaks; 0 means it never degrades.
    pub max_durability: u32,
    /// Rounds held when full; 0 for melee weapons.
    pub ammo_capacity: u32,
    /// Catalog id of the ammunition this weapon fires.
    pub ammo_id: Option<String>,
    /// Reach weapons are easier to land and keep enemies at bay.
    pub reach: bool,
    /// Health restored on use.
    pub heal: u32,
    /// Hunger restored on use.
    pub hunger_restore: u32,
    /// Thirst restored on use.
    pub thirst_restore: u32,
    /// Whether using this item stops bleeding.
    pub cures_bleeding: bool,
    /// Whether using this item cures infection.
    pub cures_infection: bool,
    /// Whether using this item sets a broken limb.
    pub cures_broken_limb: bool,
    /// Splash damage for [`EffectTag::AreaBurst`] weapons.
    pub splash_damage: u32,
    /// The item is destroyed after a single attack (grenades).
    pub single_use: bool,
    /// Duration in turns of any affliction this weapon applies.
    pub effect_duration: u32,
    /// Special combat behaviors.
    pub effects: Vec<EffectTag>,
    /// How many units a fresh loot drop contains.
    pub stack: u32,
    /// Location-exclusive items never appear in generic loot pools.
    pub exclusive: bool,
}

impl ItemTemplate {
    fn base(id: &str, name: &str, kind: ItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            damage: 0,
            damage_type: None,
            max_durability: 0,
            ammo_capacity: 0,
            ammo_id: None,
            reach: false,
            heal: 0,
            hunger_restore: 0,
            thirst_restore: 0,
            cures_bleeding: false,
            cures_infection: false,
            cures_broken_limb: false,
            splash_damage: 0,
            single_use: false,
            effect_duration: 0,
            effects: Vec::new(),
            stack: 1,
            exclusive: false,
        }
    }

    /// A melee or thrown weapon definition.
    pub fn weapon(id: &str, name: &str, damage: u32, damage_type: DamageType) -> Self {
        let mut t = Self::base(id, name, ItemKind::Weapon);
        t.damage = damage;
        t.damage_type = Some(damage_type);
        t
    }

    /// An ammunition definition.
    pub fn ammo(id: &str, name: &str, stack: u32) -> Self {
        let mut t = Self::base(id, name, ItemKind::Ammo);
        t.stack = stack;
        t
    }

    /// A food definition.
    pub fn food(id: &str, name: &str, hunger: u32, thirst: u32) -> Self {
        let mut t = Self::base(id, name, ItemKind::Food);
        t.hunger_restore = hunger;
        t.thirst_restore = thirst;
        t
    }

    /// A medical item definition.
    pub fn medical(id: &str, name: &str, heal: u32) -> Self {
        let mut t = Self::base(id, name, ItemKind::Medical);
        t.heal = heal;
        t
    }

    /// A crafting material definition.
    pub fn material(id: &str, name: &str) -> Self {
        Self::base(id, name, ItemKind::Material)
    }

    /// Set how many uses the item survives.
    pub fn with_durability(mut self, durability: u32) -> Self {
        self.max_durability = durability;
        self
    }

    /// Make this a ranged weapon firing the given ammunition.
    pub fn with_ammo(mut self, ammo_id: &str, capacity: u32) -> Self {
        self.ammo_id = Some(ammo_id.to_string());
        self.ammo_capacity = capacity;
        self
    }

    /// Mark as a reach weapon.
    pub fn with_reach(mut self) -> Self {
        self.reach = true;
        self
    }

    /// Attach a special combat behavior.
    pub fn with_effect(mut self, tag: EffectTag) -> Self {
        self.effects.push(tag);
        self
    }

    /// Set splash damage and single-use consumption (area weapons).
    pub fn with_burst(mut self, splash: u32, single_use: bool) -> Self {
        self.splash_damage = splash;
        self.single_use = single_use;
        self
    }

    /// Set the duration of applied afflictions.
    pub fn with_effect_duration(mut self, turns: u32) -> Self {
        self.effect_duration = turns;
        self
    }

    /// Mark as curing bleeding and/or infection.
    pub fn with_cures(mut self, bleeding: bool, infection: bool) -> Self {
        self.cures_bleeding = bleeding;
        self.cures_infection = infection;
        self
    }

    /// Mark as setting broken limbs.
    pub fn with_splint(mut self) -> Self {
        self.cures_broken_limb = true;
        self
    }

    /// Set the default stack size for loot drops.
    pub fn with_stack(mut self, stack: u32) -> Self {
        self.stack = stack;
        self
    }

    /// Keep this item out of generic loot pools.
    pub fn with_exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Whether the weapon needs ammunition to fire.
    pub fn is_ranged(&self) -> bool {
        self.ammo_capacity > 0
    }

    /// Whether instances of this template can merge into one stack.
    pub fn stackable(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Ammo | ItemKind::Food | ItemKind::Medical | ItemKind::Material
        )
    }
}

/// A mutable copy of a template held in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    /// The definition this instance was stamped from.
    pub template: ItemTemplate,
    /// Remaining uses; meaningful only when `template.max_durability > 0`.
    pub durability: u32,
    /// Rounds currently loaded.
    pub ammo_loaded: u32,
    /// Units in this stack.
    pub count: u32,
}

impl ItemInstance {
    /// Stamp a fresh instance from a template: full durability, full
    /// magazine, default stack size.
    pub fn of(template: &ItemTemplate) -> Self {
        Self {
            template: template.clone(),
            durability: template.max_durability,
            ammo_loaded: template.ammo_capacity,
            count: template.stack.max(1),
        }
    }

    /// Catalog id of the underlying template.
    pub fn id(&self) -> &str {
        &self.template.id
    }

    /// Display name of the underlying template.
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Whether this weapon degrades and has run out of durability.
    pub fn is_broken(&self) -> bool {
        self.template.max_durability > 0 && self.durability == 0
    }
}
