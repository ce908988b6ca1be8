//! Enemies: transient, combat-scoped opponents.
//!
//! An [`Enemy`] is created by the encounter generator and discarded when
//! combat ends; it is never persisted. The kind is an explicit tagged union
//! so combat logic switches on it instead of probing for fields.

use serde::{Deserialize, Serialize};

use crate::item::DamageType;
use crate::stat::Stat;
use crate::status::{Affliction, AfflictionKind};

/// Hostile creature species, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureType {
    /// Slow, common, the fallback spawn everywhere.
    Walker,
    /// Fast but fragile.
    Runner,
    /// Loud; calls others, hunts in groups.
    Screamer,
    /// Swollen with gas; bursts under blades.
    Bloated,
    /// Ambushes from cover at night.
    Stalker,
    /// Heavy bruiser.
    Brute,
    /// Sealed suit shrugs off blows; pierce the seams.
    Hazmat,
}

impl CreatureType {
    /// All species, weakest first.
    pub fn all() -> &'static [Self] {
        &[
            Self::Walker,
            Self::Runner,
            Self::Screamer,
            Self::Bloated,
            Self::Stalker,
            Self::Brute,
            Self::Hazmat,
        ]
    }
}

impl std::fmt::Display for CreatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Walker => write!(f, "walker"),
            Self::Runner => write!(f, "runner"),
            Self::Screamer => write!(f, "screamer"),
            Self::Bloated => write!(f, "bloated"),
            Self::Stalker => write!(f, "stalker"),
            Self::Brute => write!(f, "brute"),
            Self::Hazmat => write!(f, "hazmat"),
        }
    }
}

/// Wild animal species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalType {
    /// Common scavenger.
    FeralDog,
    /// Pack hunter.
    Wolf,
    /// Aggressive when cornered.
    Boar,
    /// Rare, very dangerous.
    Bear,
}

impl std::fmt::Display for AnimalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FeralDog => write!(f, "feral dog"),
            Self::Wolf => write!(f, "wolf"),
            Self::Boar => write!(f, "boar"),
            Self::Bear => write!(f, "bear"),
        }
    }
}

/// What category of opponent this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// A hostile creature.
    Creature {
        /// The creature species.
        species: CreatureType,
    },
    /// A wild animal.
    Animal {
        /// The animal species.
        species: AnimalType,
    },
    /// A hostile human survivor.
    Survivor {
        /// Carrying a weapon.
        armed: bool,
        /// Carrying a ranged weapon (implies `armed`).
        ranged: bool,
    },
}

/// Boss stat scaling applied by [`Enemy::promote_to_boss`].
pub const BOSS_HEALTH_SCALE: f64 = 2.5;
/// Boss damage scaling applied by [`Enemy::promote_to_boss`].
pub const BOSS_DAMAGE_SCALE: f64 = 1.75;

/// A combat opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Category and species.
    pub kind: EnemyKind,
    /// Display name.
    pub name: String,
    /// Current and maximum health.
    pub health: Stat,
    /// Damage dealt on a successful hit.
    pub damage: u32,
    /// Speed rating 0-5; drives hit chance, flee difficulty, and XP.
    pub speed: u32,
    /// Damage type this enemy is weak to.
    pub weakness: Option<DamageType>,
    /// Damage type this enemy resists.
    pub resistance: Option<DamageType>,
    /// Part of a pack; harder to flee from.
    pub pack: bool,
    /// Strikes from ambush; harder to flee from.
    pub ambush: bool,
    /// Boss variant with scaled stats.
    pub boss: bool,
    /// Active combat afflictions.
    #[serde(skip)]
    pub afflictions: Vec<Affliction>,
}

impl Enemy {
    /// Create an enemy with the given combat profile.
    pub fn new(kind: EnemyKind, name: &str, health: u32, damage: u32, speed: u32) -> Self {
        Self {
            kind,
            name: name.to_string(),
            health: Stat::full(health),
            damage,
            speed: speed.min(5),
            weakness: None,
            resistance: None,
            pack: false,
            ambush: false,
            boss: false,
            afflictions: Vec::new(),
        }
    }

    /// Set the weakness damage type.
    pub fn with_weakness(mut self, weakness: DamageType) -> Self {
        self.weakness = Some(weakness);
        self
    }

    /// Set the resisted damage type.
    pub fn with_resistance(mut self, resistance: DamageType) -> Self {
        self.resistance = Some(resistance);
        self
    }

    /// Mark as a pack hunter.
    pub fn with_pack(mut self) -> Self {
        self.pack = true;
        self
    }

    /// Mark as an ambusher.
    pub fn with_ambush(mut self) -> Self {
        self.ambush = true;
        self
    }

    /// Scale this enemy into its boss variant.
    pub fn promote_to_boss(&mut self) {
        let health = (f64::from(self.health.max()) * BOSS_HEALTH_SCALE).round() as u32;
        self.health = Stat::full(health);
        self.damage = (f64::from(self.damage) * BOSS_DAMAGE_SCALE).round() as u32;
        self.boss = true;
    }

    /// Whether health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    /// Whether an active affliction makes this enemy lose its turn.
    pub fn loses_turn(&self) -> bool {
        self.afflictions.iter().any(|a| a.kind.skips_turn())
    }

    /// Whether a given affliction kind is active.
    pub fn has_affliction(&self, kind: AfflictionKind) -> bool {
        self.afflictions.iter().any(|a| a.kind == kind)
    }

    /// Apply an affliction, refreshing the duration if already present.
    pub fn afflict(&mut self, affliction: Affliction) {
        if let Some(existing) = self
            .afflictions
            .iter_mut()
            .find(|a| a.kind == affliction.kind)
        {
            existing.remaining_turns = existing.remaining_turns.max(affliction.remaining_turns);
            existing.damage_per_turn = existing.damage_per_turn.max(affliction.damage_per_turn);
        } else {
            self.afflictions.push(affliction);
        }
    }

    /// Tick afflictions at the start of the enemy's turn: apply
    /// damage-over-time, decrement durations, drop expired entries.
    /// Returns the total damage dealt.
    pub fn tick_afflictions(&mut self) -> u32 {
        let mut total = 0;
        for a in &mut self.afflictions {
            total += a.damage_per_turn;
            a.remaining_turns = a.remaining_turns.saturating_sub(1);
        }
        self.health.deplete(total);
        self.afflictions.retain(|a| a.remaining_turns > 0);
        total
    }
}
