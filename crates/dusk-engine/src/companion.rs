//! Companion assistance during combat.
//!
//! Each healthy companion independently rolls to pitch in. Assists stack
//! into a damage multiplier that is always at least 1.0; helping out
//! carries a small risk of getting hurt and sitting out for a while.

use dusk_core::{Companion, CompanionSkill, DamageType, Enemy};
use rand::Rng;
use rand::rngs::StdRng;

/// Assist chance at relationship 0.
pub const ASSIST_BASE_CHANCE: f64 = 0.2;
/// Assist chance gained per relationship point.
pub const ASSIST_RELATIONSHIP_SCALE: f64 = 0.005;
/// Damage bonus contributed by one successful assist, before scaling.
pub const ASSIST_DAMAGE_BONUS: f64 = 0.25;
/// Bonus multiplier when the player's weapon matches the companion's
/// specialization.
pub const SPECIALIZATION_MULT: f64 = 1.5;
/// Chance a successful assist injures the companion.
pub const INJURY_CHANCE: f64 = 0.08;
/// Shortest injury recovery, in hours.
pub const INJURY_HOURS_MIN: f64 = 12.0;
/// Longest injury recovery, in hours.
pub const INJURY_HOURS_MAX: f64 = 36.0;

/// The result of polling the companions for help.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistOutcome {
    /// Damage multiplier to apply to the player's attack; at least 1.0.
    pub multiplier: f64,
    /// Narration lines for the frontend.
    pub messages: Vec<String>,
    /// Names of companions injured while helping.
    pub injured: Vec<String>,
}

/// A companion's chance of assisting this attack.
pub fn assist_chance(companion: &Companion) -> f64 {
    ASSIST_BASE_CHANCE + ASSIST_RELATIONSHIP_SCALE * f64::from(companion.relationship)
}

/// How much a companion's training is worth against this enemy with this
/// weapon.
pub fn skill_factor(
    skill: CompanionSkill,
    weapon_type: Option<DamageType>,
    enemy: &Enemy,
) -> f64 {
    match skill {
        CompanionSkill::Combat => 1.2,
        CompanionSkill::Marksmanship => {
            if enemy.speed >= 3 {
                1.4
            } else {
                1.1
            }
        }
        CompanionSkill::BladeMastery => {
            if weapon_type == Some(DamageType::Blade) {
                1.5
            } else {
                1.0
            }
        }
        CompanionSkill::Explosives => {
            if enemy.pack || enemy.boss {
                1.5
            } else {
                1.1
            }
        }
    }
}

/// Roll assistance from every active companion.
pub fn assist(
    rng: &mut StdRng,
    companions: &mut [Companion],
    weapon_type: Option<DamageType>,
    enemy: &Enemy,
) -> AssistOutcome {
    let mut outcome = AssistOutcome {
        multiplier: 1.0,
        messages: Vec::new(),
        injured: Vec::new(),
    };
    for companion in companions.iter_mut().filter(|c| c.is_active()) {
        if rng.random::<f64>() >= assist_chance(companion) {
            continue;
        }
        let mut bonus = ASSIST_DAMAGE_BONUS * skill_factor(companion.skill, weapon_type, enemy);
        if weapon_type.is_some() && companion.specialization == weapon_type {
            bonus *= SPECIALIZATION_MULT;
        }
        outcome.multiplier += bonus;
        outcome
            .messages
            .push(format!("{} moves in to support the attack", companion.name));
        if rng.random::<f64>() < INJURY_CHANCE {
            companion.injure(rng.random_range(INJURY_HOURS_MIN..INJURY_HOURS_MAX));
            outcome.injured.push(companion.name.clone());
            outcome
                .messages
                .push(format!("{} gets hurt covering you and falls back", companion.name));
        }
    }
    outcome
}
