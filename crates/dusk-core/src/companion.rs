//! Companions: recruited allies that may assist in combat.

use serde::{Deserialize, Serialize};

use crate::item::DamageType;

/// Maximum number of companions that can travel with the player.
pub const MAX_ACTIVE_COMPANIONS: usize = 2;

/// A companion's combat training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionSkill {
    /// General brawling; modest bonus against anything.
    Combat,
    /// Shines against fast targets.
    Marksmanship,
    /// Amplifies blade-weapon assists.
    BladeMastery,
    /// Devastating against packs and bosses.
    Explosives,
}

impl std::fmt::Display for CompanionSkill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Combat => write!(f, "combat"),
            Self::Marksmanship => write!(f, "marksmanship"),
            Self::BladeMastery => write!(f, "blade mastery"),
            Self::Explosives => write!(f, "explosives"),
        }
    }
}

/// A recruited ally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    /// Display name.
    pub name: String,
    /// Relationship score 0-100; drives the assist chance.
    pub relationship: u32,
    /// Combat training.
    pub skill: CompanionSkill,
    /// Weapon damage type this companion fights best alongside.
    pub specialization: Option<DamageType>,
    /// Hours until an injured companion can assist again; 0 when healthy.
    pub injured_hours: f64,
}

impl Companion {
    /// Recruit a companion; relationship is clamped to 0-100.
    pub fn new(name: &str, relationship: u32, skill: CompanionSkill) -> Self {
        Self {
            name: name.to_string(),
            relationship: relationship.min(100),
            skill,
            specialization: None,
            injured_hours: 0.0,
        }
    }

    /// Set the weapon-type specialization.
    pub fn with_specialization(mut self, damage_type: DamageType) -> Self {
        self.specialization = Some(damage_type);
        self
    }

    /// Whether this companion can currently assist.
    pub fn is_active(&self) -> bool {
        self.injured_hours <= 0.0
    }

    /// Take the companion out of action for `hours`.
    pub fn injure(&mut self, hours: f64) {
        self.injured_hours = self.injured_hours.max(hours);
    }

    /// Advance recovery by `hours`.
    pub fn recover(&mut self, hours: f64) {
        self.injured_hours = (self.injured_hours - hours).max(0.0);
    }

    /// Strengthen the bond, clamped to 100.
    pub fn improve_relationship(&mut self, amount: u32) {
        self.relationship = self.relationship.saturating_add(amount).min(100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_clamped() {
        let c = Companion::new("Mara", 150, CompanionSkill::Combat);
        assert_eq!(c.relationship, 100);
    }

    #[test]
    fn injury_and_recovery() {
        let mut c = Companion::new("Theo", 60, CompanionSkill::Marksmanship);
        assert!(c.is_active());
        c.injure(24.0);
        assert!(!c.is_active());
        c.recover(12.0);
        assert!(!c.is_active());
        c.recover(12.0);
        assert!(c.is_active());
    }

    #[test]
    fn injure_keeps_longest_recovery() {
        let mut c = Companion::new("Theo", 60, CompanionSkill::Combat);
        c.injure(24.0);
        c.injure(6.0);
        assert!((c.injured_hours - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relationship_improvement_caps() {
        let mut c = Companion::new("Mara", 95, CompanionSkill::Explosives);
        c.improve_relationship(20);
        assert_eq!(c.relationship, 100);
    }
}
