//! Player status effects and enemy afflictions.

use serde::{Deserialize, Serialize};

/// Upper bound for the exhaustion and insanity gauges.
pub const GAUGE_MAX: u32 = 100;

/// Long-running conditions on the player character.
///
/// Bleeding, infection, and broken limbs only occur in hardcore mode;
/// exhaustion and insanity are tracked in both rulesets but insanity only
/// rises under hardcore rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Losing health every hour until treated or self-resolved.
    pub bleeding: bool,
    /// Losing health and gaining insanity every hour until cured.
    pub infected: bool,
    /// Halves stamina regeneration and worsens combat rolls.
    pub broken_limb: bool,
    /// 0-100 gauge. Above 50 it penalizes stamina regeneration.
    pub exhaustion: u32,
    /// 0-100 gauge. Above 50 it penalizes accuracy; above 70 hallucinations start.
    pub insanity: u32,
}

impl StatusEffects {
    /// Raise exhaustion, clamped to [`GAUGE_MAX`].
    pub fn add_exhaustion(&mut self, amount: u32) {
        self.exhaustion = self.exhaustion.saturating_add(amount).min(GAUGE_MAX);
    }

    /// Lower exhaustion, clamped to 0.
    pub fn reduce_exhaustion(&mut self, amount: u32) {
        self.exhaustion = self.exhaustion.saturating_sub(amount);
    }

    /// Raise insanity, clamped to [`GAUGE_MAX`].
    pub fn add_insanity(&mut self, amount: u32) {
        self.insanity = self.insanity.saturating_add(amount).min(GAUGE_MAX);
    }

    /// Lower insanity, clamped to 0.
    pub fn reduce_insanity(&mut self, amount: u32) {
        self.insanity = self.insanity.saturating_sub(amount);
    }

    /// Whether any flag-type condition is active.
    pub fn any_condition(&self) -> bool {
        self.bleeding || self.infected || self.broken_limb
    }
}

/// A time-limited affliction attached to an enemy during combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfflictionKind {
    /// Skips the enemy's turns.
    Stun,
    /// Skips the enemy's turns; thawing enemies strike weaker.
    Frozen,
    /// Damage over time.
    Bleed,
    /// Damage over time; corrodes the enemy's attacks.
    Acid,
    /// Damage over time.
    Burn,
}

impl AfflictionKind {
    /// Whether this affliction makes the enemy lose its turn entirely.
    pub fn skips_turn(self) -> bool {
        matches!(self, Self::Stun | Self::Frozen)
    }
}

impl std::fmt::Display for AfflictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stun => write!(f, "stunned"),
            Self::Frozen => write!(f, "frozen"),
            Self::Bleed => write!(f, "bleeding"),
            Self::Acid => write!(f, "corroded"),
            Self::Burn => write!(f, "burning"),
        }
    }
}

/// An active affliction with its remaining duration in combat turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affliction {
    /// What kind of affliction this is.
    pub kind: AfflictionKind,
    /// Turns left before it wears off.
    pub remaining_turns: u32,
    /// Damage dealt to the afflicted enemy at the start of each of its turns.
    pub damage_per_turn: u32,
}

impl Affliction {
    /// Create an affliction lasting `turns` turns.
    pub fn new(kind: AfflictionKind, turns: u32, damage_per_turn: u32) -> Self {
        Self {
            kind,
            remaining_turns: turns,
            damage_per_turn,
        }
    }
}
