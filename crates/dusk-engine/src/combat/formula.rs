//! Hit, critical, flee, and damage-multiplier formulas.
//!
//! Every chance is clamped before rolling, so no pile of penalties can
//! push a roll outside [`CHANCE_MIN`]..[`CHANCE_MAX`].

use dusk_core::{DamageType, Enemy, EnemyKind, PlayerState, Weather};
use dusk_sim::clock::DayPhase;
use dusk_sim::weather;

/// Lower clamp on every combat chance.
pub const CHANCE_MIN: f64 = 0.2;
/// Upper clamp on every combat chance.
pub const CHANCE_MAX: f64 = 0.95;

/// Base chance for a player attack to land.
pub const BASE_HIT_CHANCE: f64 = 0.8;
/// Hit bonus per level past the first.
pub const LEVEL_HIT_BONUS: f64 = 0.05;
/// Cap on the total level hit bonus.
pub const LEVEL_HIT_BONUS_CAP: f64 = 0.15;
/// Penalty when stamina falls under 30% / 15%.
pub const LOW_STAMINA_PENALTY: f64 = 0.15;
/// Penalty when stamina falls under 15%.
pub const CRITICAL_STAMINA_PENALTY: f64 = 0.25;
/// Penalty when insanity exceeds 50 / 80.
pub const HIGH_INSANITY_PENALTY: f64 = 0.1;
/// Penalty when insanity exceeds 80.
pub const SEVERE_INSANITY_PENALTY: f64 = 0.2;
/// Hit bonus for reach weapons, and the matching reduction on enemy hits.
pub const REACH_BONUS: f64 = 0.1;
/// How strongly the day phase's visibility factor bends accuracy.
pub const VISIBILITY_ACCURACY_SCALE: f64 = 0.25;

/// Base critical-hit chance (hardcore only).
pub const BASE_CRIT_CHANCE: f64 = 0.10;
/// Critical hits multiply damage by this.
pub const CRIT_DAMAGE_MULT: f64 = 1.5;

/// Damage multiplier when the weapon matches the enemy's weakness.
pub const TYPE_ADVANTAGE_MULT: f64 = 2.5;
/// Damage multiplier when the enemy resists the weapon's type.
pub const RESISTANCE_MULT: f64 = 0.5;

/// Base enemy hit chance before speed scaling.
pub const ENEMY_BASE_HIT: f64 = 0.6;
/// Enemy hit chance gained per point of effective speed.
pub const ENEMY_SPEED_HIT_SCALE: f64 = 0.1;
/// Player dodge gained per level past the first.
pub const DODGE_PER_LEVEL: f64 = 0.02;
/// Cap on the level dodge bonus.
pub const DODGE_CAP: f64 = 0.1;

/// Base flee chance.
pub const BASE_FLEE_CHANCE: f64 = 0.5;
/// Flee chance lost per point of enemy speed.
pub const FLEE_SPEED_PENALTY: f64 = 0.05;
/// Flee chance gained per level past the first.
pub const FLEE_LEVEL_BONUS: f64 = 0.02;
/// Flee penalty when stamina falls under 30%.
pub const FLEE_STAMINA_PENALTY: f64 = 0.1;
/// Flee penalty against pack hunters and ambushers, each.
pub const FLEE_TRAIT_PENALTY: f64 = 0.1;
/// Flee penalty against an armed, ranged survivor.
pub const FLEE_RANGED_SURVIVOR_PENALTY: f64 = 0.15;

/// Chance for a player attack to land.
pub fn player_hit_chance(
    player: &PlayerState,
    ranged: bool,
    reach: bool,
    weather: Weather,
    phase: DayPhase,
) -> f64 {
    let mut chance = BASE_HIT_CHANCE;
    chance += (LEVEL_HIT_BONUS * f64::from(player.level.saturating_sub(1))).min(LEVEL_HIT_BONUS_CAP);

    let stamina = player.stamina.ratio();
    if stamina < 0.15 {
        chance -= CRITICAL_STAMINA_PENALTY;
    } else if stamina < 0.3 {
        chance -= LOW_STAMINA_PENALTY;
    }

    if player.status.insanity > 80 {
        chance -= SEVERE_INSANITY_PENALTY;
    } else if player.status.insanity > 50 {
        chance -= HIGH_INSANITY_PENALTY;
    }

    chance += weather::accuracy_delta(weather, ranged);
    chance += (phase.visibility_multiplier() - 1.0) * VISIBILITY_ACCURACY_SCALE;
    if reach {
        chance += REACH_BONUS;
    }
    chance.clamp(CHANCE_MIN, CHANCE_MAX)
}

/// Critical-hit chance. Only rolled under hardcore rules.
pub fn critical_chance(weather: Weather) -> f64 {
    let delta = match weather {
        Weather::Cold => 0.02,
        Weather::Fog => -0.03,
        Weather::Storm => -0.02,
        _ => 0.0,
    };
    (BASE_CRIT_CHANCE + delta).max(0.0)
}

/// Damage multiplier from matching the weapon's type against the enemy.
pub fn type_advantage(damage_type: Option<DamageType>, enemy: &Enemy) -> f64 {
    let Some(dt) = damage_type else {
        return 1.0;
    };
    if enemy.weakness == Some(dt) {
        TYPE_ADVANTAGE_MULT
    } else if enemy.resistance == Some(dt) {
        RESISTANCE_MULT
    } else {
        1.0
    }
}

/// The enemy's effective speed after weather and day-phase scaling.
/// Phase scaling only applies to creatures.
pub fn effective_speed(enemy: &Enemy, weather: Weather, phase: DayPhase) -> f64 {
    let mut speed = f64::from(enemy.speed) * weather::profile(weather).enemy_speed;
    if matches!(enemy.kind, EnemyKind::Creature { .. }) {
        speed *= phase.creature_speed_multiplier();
    }
    speed
}

/// Chance for an enemy attack to land.
pub fn enemy_hit_chance(
    enemy: &Enemy,
    player: &PlayerState,
    weather: Weather,
    phase: DayPhase,
    reach: bool,
) -> f64 {
    let mut chance = ENEMY_BASE_HIT + ENEMY_SPEED_HIT_SCALE * effective_speed(enemy, weather, phase);

    let dodge = (DODGE_PER_LEVEL * f64::from(player.level.saturating_sub(1))).min(DODGE_CAP);
    chance -= dodge;
    if reach {
        chance -= REACH_BONUS;
    }

    chance += weather::enemy_accuracy_delta(weather);

    if player.stamina.ratio() < 0.2 {
        chance += 0.1;
    }
    if player.status.broken_limb {
        chance += 0.1;
    }
    if player.status.insanity > 50 {
        chance += 0.05;
    }
    chance.clamp(CHANCE_MIN, CHANCE_MAX)
}

/// Chance for a flee attempt to succeed.
pub fn flee_chance(player: &PlayerState, enemy: &Enemy, weather: Weather) -> f64 {
    let mut chance = BASE_FLEE_CHANCE;
    chance -= FLEE_SPEED_PENALTY * f64::from(enemy.speed);
    chance += FLEE_LEVEL_BONUS * f64::from(player.level.saturating_sub(1));
    if player.stamina.ratio() < 0.3 {
        chance -= FLEE_STAMINA_PENALTY;
    }
    if enemy.pack {
        chance -= FLEE_TRAIT_PENALTY;
    }
    if enemy.ambush {
        chance -= FLEE_TRAIT_PENALTY;
    }
    if let EnemyKind::Survivor { armed: true, ranged: true } = enemy.kind {
        chance -= FLEE_RANGED_SURVIVOR_PENALTY;
    }
    chance += weather::flee_delta(weather);
    chance.clamp(CHANCE_MIN, CHANCE_MAX)
}

/// Experience awarded for a kill, scaled by speed, category, and boss
/// status.
pub fn xp_award(enemy: &Enemy) -> u32 {
    let kind_bonus = match enemy.kind {
        EnemyKind::Creature { .. } => 10,
        EnemyKind::Animal { .. } => 5,
        EnemyKind::Survivor { .. } => 15,
    };
    let base = 10 + 6 * enemy.speed + kind_bonus;
    if enemy.boss { base * 3 } else { base }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_core::CreatureType;

    fn player() -> PlayerState {
        PlayerState::new("Ash", "camp", false)
    }

    fn walker() -> Enemy {
        Enemy::new(
            EnemyKind::Creature {
                species: CreatureType::Walker,
            },
            "Walker",
            30,
            8,
            1,
        )
    }

    #[test]
    fn baseline_hit_chance() {
        let p = player();
        let c = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Day);
        assert!((c - BASE_HIT_CHANCE).abs() < 1e-9);
    }

    #[test]
    fn level_bonus_caps() {
        let mut p = player();
        p.level = 3;
        let c = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Day);
        assert!((c - 0.9).abs() < 1e-9);
        p.level = 30;
        let c = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Day);
        assert!((c - CHANCE_MAX).abs() < 1e-9);
    }

    #[test]
    fn hit_chance_clamped_at_extremes() {
        let mut p = player();
        p.stamina.deplete(1000);
        p.status.insanity = 100;
        for w in Weather::all() {
            for phase in [DayPhase::Day, DayPhase::DawnDusk, DayPhase::Night] {
                let c = player_hit_chance(&p, true, false, *w, phase);
                assert!((CHANCE_MIN..=CHANCE_MAX).contains(&c), "{w} {phase}: {c}");
            }
        }
    }

    #[test]
    fn weather_accuracy_applies() {
        let p = player();
        let clear = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Day);
        let fog = player_hit_chance(&p, false, false, Weather::Fog, DayPhase::Day);
        assert!((clear - fog - 0.2).abs() < 1e-9);
        // Wind hurts ranged more than melee.
        let wind_melee = player_hit_chance(&p, false, false, Weather::Wind, DayPhase::Day);
        let wind_ranged = player_hit_chance(&p, true, false, Weather::Wind, DayPhase::Day);
        assert!(wind_ranged < wind_melee);
    }

    #[test]
    fn night_dims_accuracy() {
        let p = player();
        let day = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Day);
        let night = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Night);
        assert!(night < day);
    }

    #[test]
    fn reach_helps_both_ways() {
        let p = player();
        let plain = player_hit_chance(&p, false, false, Weather::Clear, DayPhase::Day);
        let reach = player_hit_chance(&p, false, true, Weather::Clear, DayPhase::Day);
        assert!((reach - plain - REACH_BONUS).abs() < 1e-9);

        let e = walker();
        let against_plain = enemy_hit_chance(&e, &p, Weather::Clear, DayPhase::Day, false);
        let against_reach = enemy_hit_chance(&e, &p, Weather::Clear, DayPhase::Day, true);
        assert!((against_plain - against_reach - REACH_BONUS).abs() < 1e-9);
    }

    #[test]
    fn type_advantage_matrix() {
        let mut e = walker();
        assert!((type_advantage(Some(DamageType::Blade), &e) - 1.0).abs() < 1e-9);
        e.weakness = Some(DamageType::Blade);
        assert!((type_advantage(Some(DamageType::Blade), &e) - TYPE_ADVANTAGE_MULT).abs() < 1e-9);
        e.resistance = Some(DamageType::Blunt);
        assert!((type_advantage(Some(DamageType::Blunt), &e) - RESISTANCE_MULT).abs() < 1e-9);
        assert!((type_advantage(None, &e) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn enemy_hit_chance_clamped() {
        let p = player();
        let mut fast = walker();
        fast.speed = 5;
        let c = enemy_hit_chance(&fast, &p, Weather::Clear, DayPhase::Night, false);
        assert!((c - CHANCE_MAX).abs() < 1e-9);

        let mut slow = walker();
        slow.speed = 0;
        let mut leveled = player();
        leveled.level = 10;
        let c = enemy_hit_chance(&slow, &leveled, Weather::Cold, DayPhase::Day, true);
        assert!(c >= CHANCE_MIN);
    }

    #[test]
    fn player_condition_raises_enemy_chance() {
        let e = walker();
        let healthy = player();
        let base = enemy_hit_chance(&e, &healthy, Weather::Clear, DayPhase::Day, false);
        let mut battered = player();
        battered.stamina.deplete(1000);
        battered.status.broken_limb = true;
        battered.status.insanity = 60;
        let worse = enemy_hit_chance(&e, &battered, Weather::Clear, DayPhase::Day, false);
        assert!((worse - base - 0.25).abs() < 1e-9);
    }

    #[test]
    fn fog_aids_the_enemy() {
        let e = walker();
        let p = player();
        let clear = enemy_hit_chance(&e, &p, Weather::Clear, DayPhase::Day, false);
        let fog = enemy_hit_chance(&e, &p, Weather::Fog, DayPhase::Day, false);
        assert!(fog > clear);
    }

    #[test]
    fn flee_chance_baseline_and_penalties() {
        let p = player();
        let e = walker();
        let c = flee_chance(&p, &e, Weather::Clear);
        assert!((c - 0.45).abs() < 1e-9);

        let mut wolf = Enemy::new(
            EnemyKind::Animal {
                species: dusk_core::AnimalType::Wolf,
            },
            "Wolf",
            24,
            10,
            4,
        );
        wolf.pack = true;
        let c = flee_chance(&p, &wolf, Weather::Clear);
        assert!((c - (0.5 - 0.2 - 0.1)).abs() < 1e-9);
    }

    #[test]
    fn flee_chance_clamped_at_extremes() {
        let mut p = player();
        p.stamina.deplete(1000);
        let mut e = Enemy::new(
            EnemyKind::Survivor {
                armed: true,
                ranged: true,
            },
            "Marksman",
            40,
            14,
            5,
        );
        e.pack = true;
        e.ambush = true;
        for w in Weather::all() {
            let c = flee_chance(&p, &e, *w);
            assert!((CHANCE_MIN..=CHANCE_MAX).contains(&c));
        }
    }

    #[test]
    fn crit_chance_weather_adjusted_and_nonnegative() {
        assert!((critical_chance(Weather::Clear) - BASE_CRIT_CHANCE).abs() < 1e-9);
        assert!(critical_chance(Weather::Cold) > critical_chance(Weather::Clear));
        assert!(critical_chance(Weather::Fog) < critical_chance(Weather::Clear));
        for w in Weather::all() {
            assert!(critical_chance(*w) >= 0.0);
        }
    }

    #[test]
    fn xp_scales_with_speed_kind_and_boss() {
        let slow = walker();
        let mut fast = walker();
        fast.speed = 4;
        assert!(xp_award(&fast) > xp_award(&slow));

        let survivor = Enemy::new(
            EnemyKind::Survivor {
                armed: true,
                ranged: false,
            },
            "Raider",
            35,
            12,
            1,
        );
        assert!(xp_award(&survivor) > xp_award(&slow));

        let mut boss = walker();
        boss.promote_to_boss();
        assert_eq!(xp_award(&boss), xp_award(&slow) * 3);
    }
}
