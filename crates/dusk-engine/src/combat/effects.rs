//! Weapon special-effect registry.
//!
//! Special behaviors are dispatched through a tag-to-handler table looked
//! up once per attack. Each handler only records what it did on the
//! [`AttackReport`] and the enemy; the engine applies consumption and
//! clamping uniformly afterwards.

use dusk_core::{Affliction, AfflictionKind, DamageType, EffectTag, Enemy, ItemInstance};

use super::AttackReport;

/// Damage per turn for burn afflictions.
pub const BURN_DOT: u32 = 3;
/// Damage per turn for acid afflictions.
pub const ACID_DOT: u32 = 2;
/// Damage per turn for rend (bleed) afflictions.
pub const REND_DOT: u32 = 2;

/// A snapshot of the attacking weapon, taken before any mutation.
///
/// Handlers work off this copy so the engine can hold mutable borrows of
/// the inventory and the enemy at different times.
#[derive(Debug, Clone)]
pub struct WeaponProfile {
    /// Base damage.
    pub damage: u32,
    /// Damage type.
    pub damage_type: Option<DamageType>,
    /// Fires ammunition.
    pub ranged: bool,
    /// Reach weapon.
    pub reach: bool,
    /// Special behavior tags.
    pub effects: Vec<EffectTag>,
    /// Affliction duration in turns.
    pub effect_duration: u32,
    /// Splash damage for area bursts.
    pub splash_damage: u32,
    /// Destroyed after one attack.
    pub single_use: bool,
    /// Degrades with use.
    pub degrades: bool,
}

impl WeaponProfile {
    /// Snapshot an equipped weapon.
    pub fn of(weapon: &ItemInstance) -> Self {
        let t = &weapon.template;
        Self {
            damage: t.damage,
            damage_type: t.damage_type,
            ranged: t.is_ranged(),
            reach: t.reach,
            effects: t.effects.clone(),
            effect_duration: t.effect_duration,
            splash_damage: t.splash_damage,
            single_use: t.single_use,
            degrades: t.max_durability > 0,
        }
    }

    /// The bare-hands profile used when nothing is equipped.
    pub fn unarmed() -> Self {
        Self {
            damage: 5,
            damage_type: Some(DamageType::Blunt),
            ranged: false,
            reach: false,
            effects: Vec::new(),
            effect_duration: 0,
            splash_damage: 0,
            single_use: false,
            degrades: false,
        }
    }

    /// Whether the weapon carries a given tag.
    pub fn has(&self, tag: EffectTag) -> bool {
        self.effects.contains(&tag)
    }
}

/// An on-hit effect handler.
pub type EffectHandler = fn(&WeaponProfile, &mut Enemy, &mut AttackReport);

const REGISTRY: &[(EffectTag, EffectHandler)] = &[
    (EffectTag::AreaBurst, area_burst),
    (EffectTag::Stun, stun),
    (EffectTag::Freeze, freeze),
    (EffectTag::Burn, burn),
    (EffectTag::Acid, acid),
    (EffectTag::Rend, rend),
    (EffectTag::BoltRecovery, bolt_recovery),
];

/// The tag-to-handler table. New weapon behaviors are added here, not as
/// new arms of a branch chain.
pub fn registry() -> &'static [(EffectTag, EffectHandler)] {
    REGISTRY
}

/// Run every handler for the weapon's tags against a landed hit.
pub fn apply_on_hit(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    for tag in &profile.effects {
        if let Some((_, handler)) = registry().iter().find(|(t, _)| t == tag) {
            handler(profile, enemy, report);
        }
    }
}

fn area_burst(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    report.splash = profile.splash_damage;
    enemy.health.deplete(profile.splash_damage);
    if profile.single_use {
        report.weapon_consumed = true;
    }
}

fn stun(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    enemy.afflict(Affliction::new(
        AfflictionKind::Stun,
        profile.effect_duration.max(1),
        0,
    ));
    report.inflicted.push(AfflictionKind::Stun);
}

fn freeze(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    enemy.afflict(Affliction::new(
        AfflictionKind::Frozen,
        profile.effect_duration.max(1),
        0,
    ));
    report.inflicted.push(AfflictionKind::Frozen);
}

fn burn(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    enemy.afflict(Affliction::new(
        AfflictionKind::Burn,
        profile.effect_duration.max(1),
        BURN_DOT,
    ));
    report.inflicted.push(AfflictionKind::Burn);
}

fn acid(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    enemy.afflict(Affliction::new(
        AfflictionKind::Acid,
        profile.effect_duration.max(1),
        ACID_DOT,
    ));
    report.inflicted.push(AfflictionKind::Acid);
}

fn rend(profile: &WeaponProfile, enemy: &mut Enemy, report: &mut AttackReport) {
    enemy.afflict(Affliction::new(
        AfflictionKind::Bleed,
        profile.effect_duration.max(1),
        REND_DOT,
    ));
    report.inflicted.push(AfflictionKind::Bleed);
}

fn bolt_recovery(_profile: &WeaponProfile, _enemy: &mut Enemy, report: &mut AttackReport) {
    report.bolt_recoverable = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_core::{CreatureType, EnemyKind, ItemTemplate};

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
    fn every_tag_has_a_handler() {
        for tag in [
            EffectTag::AreaBurst,
            EffectTag::Stun,
            EffectTag::Freeze,
            EffectTag::Burn,
            EffectTag::Acid,
            EffectTag::Rend,
            EffectTag::BoltRecovery,
        ] {
            assert!(
                registry().iter().any(|(t, _)| *t == tag),
                "{tag:?} has no handler"
            );
        }
    }

    #[test]
    fn area_burst_splashes_and_consumes() {
        let molotov = ItemTemplate::weapon("molotov", "Molotov", 20, DamageType::Fire)
            .with_burst(10, true)
            .with_effect(EffectTag::AreaBurst)
            .with_effect(EffectTag::Burn)
            .with_effect_duration(3);
        let profile = WeaponProfile::of(&ItemInstance::of(&molotov));
        let mut enemy = walker();
        let mut report = AttackReport::default();
        apply_on_hit(&profile, &mut enemy, &mut report);
        assert_eq!(report.splash, 10);
        assert!(report.weapon_consumed);
        assert_eq!(enemy.health.value(), 20);
        assert!(enemy.has_affliction(AfflictionKind::Burn));
        assert_eq!(report.inflicted, vec![AfflictionKind::Burn]);
    }

    #[test]
    fn stun_handler_disables_enemy() {
        let baton = ItemTemplate::weapon("baton", "Baton", 14, DamageType::Blunt)
            .with_effect(EffectTag::Stun)
            .with_effect_duration(2);
        let profile = WeaponProfile::of(&ItemInstance::of(&baton));
        let mut enemy = walker();
        let mut report = AttackReport::default();
        apply_on_hit(&profile, &mut enemy, &mut report);
        assert!(enemy.loses_turn());
    }

    #[test]
    fn bolt_recovery_marks_report() {
        let crossbow = ItemTemplate::weapon("crossbow", "Crossbow", 26, DamageType::Piercing)
            .with_ammo("bolt", 1)
            .with_effect(EffectTag::BoltRecovery);
        let profile = WeaponProfile::of(&ItemInstance::of(&crossbow));
        let mut enemy = walker();
        let mut report = AttackReport::default();
        apply_on_hit(&profile, &mut enemy, &mut report);
        assert!(report.bolt_recoverable);
        assert_eq!(enemy.health.value(), 30);
    }

    #[test]
    fn unarmed_profile_is_harmless_but_valid() {
        let p = WeaponProfile::unarmed();
        assert_eq!(p.damage, 5);
        assert!(!p.degrades);
        assert!(p.effects.is_empty());
    }

    #[test]
    fn plain_weapon_triggers_nothing() {
        let bat = ItemTemplate::weapon("bat", "Bat", 12, DamageType::Blunt);
        let profile = WeaponProfile::of(&ItemInstance::of(&bat));
        let mut enemy = walker();
        let mut report = AttackReport::default();
        apply_on_hit(&profile, &mut enemy, &mut report);
        assert_eq!(report.splash, 0);
        assert!(report.inflicted.is_empty());
        assert!(!report.weapon_consumed);
    }
}
