//! Procedural encounter generation.
//!
//! Whether something finds the player, and what, is a function of the
//! location's risk profile and the time/weather context. All probabilities
//! are public constants and every roll flows through the caller's RNG.

use dusk_core::{Bestiary, CreatureType, Enemy, EnemyKind, Location, Weather};
use rand::Rng;
use rand::rngs::StdRng;

use dusk_sim::clock::DayPhase;
use dusk_sim::weighted::pick_weighted;

/// Default share of encounters that are hostile creatures.
pub const CREATURE_WEIGHT: f64 = 0.6;
/// Default share of encounters that are animals.
pub const ANIMAL_WEIGHT: f64 = 0.25;
/// Default share of encounters that are hostile survivors.
pub const SURVIVOR_WEIGHT: f64 = 0.15;

/// Encounter odds grow by this much per danger level.
pub const DANGER_CHANCE_SCALE: f64 = 0.1;

/// Chance of a boss variant at a boss lair of sufficient danger.
pub const BOSS_LAIR_CHANCE: f64 = 0.03;
/// Minimum location danger for the ambient boss roll.
pub const BOSS_MIN_DANGER: u32 = 5;

/// Chance an encountered survivor is armed, before danger scaling.
pub const SURVIVOR_ARMED_BASE: f64 = 0.4;
/// Armed chance gained per danger level.
pub const SURVIVOR_ARMED_PER_DANGER: f64 = 0.05;
/// Chance an armed survivor carries a ranged weapon.
pub const SURVIVOR_RANGED_CHANCE: f64 = 0.5;

/// Time-and-weather context for an encounter roll, assembled by the caller.
#[derive(Debug, Clone, Copy)]
pub struct EncounterContext {
    /// Current day phase.
    pub phase: DayPhase,
    /// Current weather.
    pub weather: Weather,
    /// Days survived so far.
    pub days: u32,
    /// A mission trigger has unlocked a boss here.
    pub boss_unlocked: bool,
}

/// The effective encounter probability for a location.
pub fn encounter_chance(location: &Location) -> f64 {
    (location.base_encounter_chance * (1.0 + f64::from(location.danger) * DANGER_CHANCE_SCALE))
        .min(1.0)
}

/// Creature spawn weights for a danger level and day phase.
///
/// The phase multiplier is applied uniformly before sampling. The table is
/// guaranteed to have a positive total: when danger gates zero everything
/// else out, the weakest species carries the roll.
pub fn creature_weights(danger: u32, phase: DayPhase) -> Vec<(CreatureType, f64)> {
    let d = f64::from(danger);
    let mut weights = vec![
        (CreatureType::Walker, 6.0),
        (CreatureType::Runner, 1.0 + 0.5 * d),
        (
            CreatureType::Screamer,
            if danger >= 2 { 1.0 + 0.3 * d } else { 0.0 },
        ),
        (
            CreatureType::Bloated,
            if danger >= 2 { 0.4 * d } else { 0.0 },
        ),
        (
            CreatureType::Stalker,
            if danger >= 3 { d - 2.0 } else { 0.0 },
        ),
        (
            CreatureType::Brute,
            if danger >= 3 { 0.6 * (d - 2.0) } else { 0.0 },
        ),
        (CreatureType::Hazmat, if danger >= 4 { d - 3.0 } else { 0.0 }),
    ];
    let mult = phase.spawn_weight_multiplier();
    for (_, w) in &mut weights {
        *w *= mult;
    }
    if weights.iter().map(|(_, w)| w.max(0.0)).sum::<f64>() <= 0.0 {
        return vec![(CreatureType::Walker, 1.0)];
    }
    weights
}

/// Roll whether an encounter happens at all, and generate it if so.
pub fn roll_encounter(
    rng: &mut StdRng,
    ctx: &EncounterContext,
    location: &Location,
    bestiary: &Bestiary,
) -> Option<Enemy> {
    if rng.random::<f64>() >= encounter_chance(location) {
        return None;
    }
    spawn_encounter(rng, ctx, location, bestiary)
}

/// Generate an encounter, skipping the probability gate.
///
/// Used directly when the caller owns the gate (e.g. interrupted sleep).
pub fn spawn_encounter(
    rng: &mut StdRng,
    ctx: &EncounterContext,
    location: &Location,
    bestiary: &Bestiary,
) -> Option<Enemy> {
    let categories = [
        ("creature", CREATURE_WEIGHT),
        ("animal", location.animal_weight.unwrap_or(ANIMAL_WEIGHT)),
        ("survivor", location.survivor_weight.unwrap_or(SURVIVOR_WEIGHT)),
    ];
    match *pick_weighted(rng, &categories)? {
        "creature" => spawn_creature(rng, ctx, location, bestiary),
        "animal" => spawn_animal(rng, location, bestiary)
            .or_else(|| spawn_creature(rng, ctx, location, bestiary)),
        _ => Some(spawn_survivor(rng, location)),
    }
}

fn spawn_creature(
    rng: &mut StdRng,
    ctx: &EncounterContext,
    location: &Location,
    bestiary: &Bestiary,
) -> Option<Enemy> {
    let weights = creature_weights(location.danger, ctx.phase);
    let species = *pick_weighted(rng, &weights)?;
    let mut enemy = bestiary.spawn_creature(species)?;
    // Bosses are out of reach of the generic roll: a mission trigger, or a
    // rare roll at a sufficiently dangerous lair.
    let triggered = ctx.boss_unlocked && location.boss_lair;
    let ambient = location.boss_lair
        && location.danger >= BOSS_MIN_DANGER
        && rng.random::<f64>() < BOSS_LAIR_CHANCE;
    if triggered || ambient {
        enemy.promote_to_boss();
    }
    Some(enemy)
}

fn spawn_animal(rng: &mut StdRng, location: &Location, bestiary: &Bestiary) -> Option<Enemy> {
    let pool = bestiary.animals_at(location.danger);
    let weights: Vec<_> = pool
        .iter()
        .map(|a| (a.species, if a.min_danger >= 4 { 0.5 } else { 1.0 }))
        .collect();
    let species = *pick_weighted(rng, &weights)?;
    bestiary.spawn_animal(species)
}

fn spawn_survivor(rng: &mut StdRng, location: &Location) -> Enemy {
    let danger = location.danger;
    let armed_chance = SURVIVOR_ARMED_BASE + SURVIVOR_ARMED_PER_DANGER * f64::from(danger);
    let armed = rng.random::<f64>() < armed_chance;
    let ranged = armed && rng.random::<f64>() < SURVIVOR_RANGED_CHANCE;
    let name = if ranged {
        "Raider Marksman"
    } else if armed {
        "Raider"
    } else {
        "Desperate Scavenger"
    };
    let health = 30 + 5 * danger;
    let damage = if ranged {
        14 + danger
    } else if armed {
        12 + danger
    } else {
        8 + danger
    };
    Enemy::new(EnemyKind::Survivor { armed, ranged }, name, health, damage, 2)
}
