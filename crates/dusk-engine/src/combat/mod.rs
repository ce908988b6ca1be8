//! Turn-based combat resolution.
//!
//! A [`Combat`] is created when an encounter produces an enemy and dropped
//! when it resolves. The state machine alternates player and enemy turns;
//! "not in combat" is the absence of a `Combat` value at the session
//! level.
//!
//! Every probability-consuming step has a `*_with_chance` variant that
//! accepts the chance explicitly, which is how the formulas and the roll
//! stay independently testable.

pub mod effects;
pub mod formula;

use dusk_core::{AfflictionKind, Enemy, EnemyKind, PlayerState, Weather};
use rand::Rng;
use rand::rngs::StdRng;

use dusk_sim::clock::DayPhase;

use crate::companion;
use crate::error::{EngineError, EngineResult};
use self::effects::WeaponProfile;

/// From level 5 up, a shot has a chance to cost no ammunition.
pub const FREE_SHOT_LEVEL: u32 = 5;
/// The zero-cost shot chance once skilled enough.
pub const FREE_SHOT_CHANCE: f64 = 0.1;
/// Chance to pull a spent bolt back out of the target.
pub const BOLT_RECOVERY_CHANCE: f64 = 0.5;

/// Hardcore: chance a creature hit infects the player.
pub const HIT_INFECTION_CHANCE: f64 = 0.10;
/// Hardcore: chance any hit opens a bleeding wound.
pub const HIT_BLEED_CHANCE: f64 = 0.15;

/// Damage multiplier on the free attack after a failed flee.
pub const FLEE_FAIL_DAMAGE_MULT: f64 = 1.35;
/// Status-chance multiplier on the free attack after a failed flee.
pub const FLEE_FAIL_STATUS_MULT: f64 = 1.5;
/// Hardcore: insanity gained when a flee attempt fails.
pub const FLEE_FAIL_INSANITY: u32 = 5;
/// Hardcore: chance a successful flee still costs something.
pub const FLEE_MISHAP_CHANCE: f64 = 0.15;
/// Health lost to a flee mishap scrape.
pub const FLEE_MISHAP_INJURY: u32 = 5;

/// Damage multiplier for an enemy weakened by acid or fire.
pub const WEAKENED_ATTACK_MULT: f64 = 0.8;

/// How a combat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The enemy fell; XP has been earned.
    Victory {
        /// Experience awarded for the kill.
        xp: u32,
    },
    /// The player fell.
    Defeat,
    /// The player got away; no rewards.
    Escaped,
}

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting on a player action.
    Player,
    /// The enemy acts next.
    Enemy,
    /// Combat is over.
    Resolved(Outcome),
}

/// Environmental modifiers for the current fight, assembled by the caller.
#[derive(Debug, Clone, Copy)]
pub struct CombatContext {
    /// Current weather.
    pub weather: Weather,
    /// Current day phase.
    pub phase: DayPhase,
}

/// What a player attack did.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    /// The hit chance that was rolled against.
    pub chance: f64,
    /// Whether the attack landed.
    pub hit: bool,
    /// Whether it was a critical hit.
    pub critical: bool,
    /// Primary damage dealt.
    pub damage: u32,
    /// Secondary splash damage dealt.
    pub splash: u32,
    /// Afflictions applied to the enemy.
    pub inflicted: Vec<AfflictionKind>,
    /// Rounds of ammunition consumed.
    pub ammo_spent: u32,
    /// The weapon's ammunition can be recovered.
    pub bolt_recoverable: bool,
    /// A spent bolt was pulled back out.
    pub bolt_recovered: bool,
    /// The weapon was consumed by the attack (thrown, burst).
    pub weapon_consumed: bool,
    /// The weapon's durability ran out.
    pub weapon_broken: bool,
    /// Companion damage multiplier that applied.
    pub companion_multiplier: f64,
    /// Companion assist narration.
    pub companion_messages: Vec<String>,
    /// Set when this attack resolved the combat.
    pub outcome: Option<Outcome>,
}

impl AttackReport {
    fn new(chance: f64) -> Self {
        Self {
            chance,
            hit: false,
            critical: false,
            damage: 0,
            splash: 0,
            inflicted: Vec::new(),
            ammo_spent: 0,
            bolt_recoverable: false,
            bolt_recovered: false,
            weapon_consumed: false,
            weapon_broken: false,
            companion_multiplier: 1.0,
            companion_messages: Vec::new(),
            outcome: None,
        }
    }
}

impl Default for AttackReport {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// What an enemy turn did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnemyStrikeReport {
    /// The enemy lost its turn to stun or freeze.
    pub skipped: bool,
    /// Damage-over-time the enemy took at the start of its turn.
    pub affliction_damage: u32,
    /// The hit chance that was rolled against.
    pub chance: f64,
    /// Whether the enemy's attack landed.
    pub hit: bool,
    /// Damage dealt to the player.
    pub damage: u32,
    /// The player started bleeding.
    pub inflicted_bleeding: bool,
    /// The player was infected.
    pub inflicted_infection: bool,
    /// Set when this turn resolved the combat.
    pub outcome: Option<Outcome>,
}

/// The cost of a hardcore flee mishap.
#[derive(Debug, Clone, PartialEq)]
pub enum FleeMishap {
    /// An item fell out of the pack in the scramble.
    DroppedItem(String),
    /// A scrape taken on the way out.
    MinorInjury(u32),
}

/// What a flee attempt did.
#[derive(Debug, Clone, PartialEq)]
pub struct FleeReport {
    /// Whether the player got away.
    pub success: bool,
    /// The flee chance that was rolled against.
    pub chance: f64,
    /// The free enemy attack triggered by failure.
    pub counter: Option<EnemyStrikeReport>,
    /// The hardcore cost of a messy escape.
    pub mishap: Option<FleeMishap>,
    /// Set when this attempt resolved the combat.
    pub outcome: Option<Outcome>,
}

/// The snapshot profile of whatever the player is currently swinging.
pub fn weapon_profile(player: &PlayerState) -> WeaponProfile {
    player
        .inventory
        .equipped_weapon()
        .map(WeaponProfile::of)
        .unwrap_or_else(WeaponProfile::unarmed)
}

/// An active combat between the player and one enemy.
#[derive(Debug, Clone)]
pub struct Combat {
    enemy: Enemy,
    state: TurnState,
    round: u32,
}

impl Combat {
    /// Start a fight against the given enemy. The player moves first.
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            state: TurnState::Player,
            round: 1,
        }
    }

    /// The opponent.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Consume the combat, yielding the enemy (for post-fight bookkeeping).
    pub fn into_enemy(self) -> Enemy {
        self.enemy
    }

    /// Whose move it is.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Current round (a round is one player action plus the reply).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether the fight is over.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, TurnState::Resolved(_))
    }

    /// How the fight ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            TurnState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn ensure_player_turn(&self) -> EngineResult<()> {
        match self.state {
            TurnState::Resolved(_) => Err(EngineError::CombatOver),
            TurnState::Enemy => Err(EngineError::NotPlayerTurn),
            TurnState::Player => Ok(()),
        }
    }

    /// Resolve a player attack with the computed hit chance.
    pub fn player_attack(
        &mut self,
        player: &mut PlayerState,
        ctx: &CombatContext,
        rng: &mut StdRng,
    ) -> EngineResult<AttackReport> {
        self.ensure_player_turn()?;
        let profile = weapon_profile(player);
        let chance =
            formula::player_hit_chance(player, profile.ranged, profile.reach, ctx.weather, ctx.phase);
        self.player_attack_with_chance(player, ctx, chance, rng)
    }

    /// Resolve a player attack against an explicit hit chance.
    pub fn player_attack_with_chance(
        &mut self,
        player: &mut PlayerState,
        ctx: &CombatContext,
        chance: f64,
        rng: &mut StdRng,
    ) -> EngineResult<AttackReport> {
        self.ensure_player_turn()?;
        let profile = weapon_profile(player);
        let mut report = AttackReport::new(chance);

        if profile.ranged {
            spend_ammo(player, rng, &mut report)?;
        }

        report.hit = rng.random::<f64>() < chance;
        if report.hit {
            if player.hardcore && rng.random::<f64>() < formula::critical_chance(ctx.weather) {
                report.critical = true;
            }

            let assist =
                companion::assist(rng, &mut player.companions, profile.damage_type, &self.enemy);
            report.companion_multiplier = assist.multiplier;
            report.companion_messages = assist.messages;

            let mut damage = f64::from(profile.damage)
                * formula::type_advantage(profile.damage_type, &self.enemy)
                * assist.multiplier;
            if report.critical {
                damage *= formula::CRIT_DAMAGE_MULT;
            }
            report.damage = damage.round() as u32;
            self.enemy.health.deplete(report.damage);

            effects::apply_on_hit(&profile, &mut self.enemy, &mut report);

            if report.bolt_recoverable
                && report.ammo_spent > 0
                && rng.random::<f64>() < BOLT_RECOVERY_CHANCE
            {
                if let Some(w) = player.inventory.equipped_weapon_mut() {
                    w.ammo_loaded += 1;
                    report.bolt_recovered = true;
                    report.ammo_spent = 0;
                }
            }

            if profile.degrades {
                if let Some(w) = player.inventory.equipped_weapon_mut() {
                    w.durability = w.durability.saturating_sub(1);
                    if w.is_broken() {
                        report.weapon_broken = true;
                    }
                }
            }
        }

        // Throwables are gone whether or not they connected.
        if profile.single_use {
            report.weapon_consumed = true;
        }
        if report.weapon_broken || report.weapon_consumed {
            if let Some(index) = player.inventory.equipped_index() {
                let _ = player.inventory.remove(index);
            }
        }

        if self.enemy.is_dead() {
            let xp = formula::xp_award(&self.enemy);
            self.state = TurnState::Resolved(Outcome::Victory { xp });
        } else {
            self.state = TurnState::Enemy;
        }
        report.outcome = self.outcome();
        Ok(report)
    }

    /// Resolve the enemy's turn.
    pub fn enemy_turn(
        &mut self,
        player: &mut PlayerState,
        ctx: &CombatContext,
        rng: &mut StdRng,
    ) -> EngineResult<EnemyStrikeReport> {
        match self.state {
            TurnState::Resolved(_) => return Err(EngineError::CombatOver),
            TurnState::Player => return Err(EngineError::NotEnemyTurn),
            TurnState::Enemy => {}
        }

        let mut report = EnemyStrikeReport::default();
        let was_disabled = self.enemy.loses_turn();
        report.affliction_damage = self.enemy.tick_afflictions();
        if self.enemy.is_dead() {
            let xp = formula::xp_award(&self.enemy);
            self.state = TurnState::Resolved(Outcome::Victory { xp });
            report.outcome = self.outcome();
            return Ok(report);
        }
        if was_disabled {
            report.skipped = true;
            self.round += 1;
            self.state = TurnState::Player;
            return Ok(report);
        }

        self.enemy_strike(player, ctx, rng, 1.0, 1.0, &mut report);
        self.round += 1;
        if !self.is_resolved() {
            self.state = TurnState::Player;
        }
        report.outcome = self.outcome();
        Ok(report)
    }

    /// Attempt to flee with the computed chance.
    pub fn attempt_flee(
        &mut self,
        player: &mut PlayerState,
        ctx: &CombatContext,
        rng: &mut StdRng,
    ) -> EngineResult<FleeReport> {
        self.ensure_player_turn()?;
        let chance = formula::flee_chance(player, &self.enemy, ctx.weather);
        self.attempt_flee_with_chance(player, ctx, chance, rng)
    }

    /// Attempt to flee against an explicit chance.
    pub fn attempt_flee_with_chance(
        &mut self,
        player: &mut PlayerState,
        ctx: &CombatContext,
        chance: f64,
        rng: &mut StdRng,
    ) -> EngineResult<FleeReport> {
        self.ensure_player_turn()?;
        let success = rng.random::<f64>() < chance;
        let mut report = FleeReport {
            success,
            chance,
            counter: None,
            mishap: None,
            outcome: None,
        };

        if success {
            self.state = TurnState::Resolved(Outcome::Escaped);
            if player.hardcore && rng.random::<f64>() < FLEE_MISHAP_CHANCE {
                if !player.inventory.is_empty() && rng.random_bool(0.5) {
                    let index = rng.random_range(0..player.inventory.len());
                    if let Ok(item) = player.inventory.remove(index) {
                        report.mishap = Some(FleeMishap::DroppedItem(item.name().to_string()));
                    }
                } else {
                    player.health.deplete(FLEE_MISHAP_INJURY);
                    report.mishap = Some(FleeMishap::MinorInjury(FLEE_MISHAP_INJURY));
                    if player.is_dead() {
                        self.state = TurnState::Resolved(Outcome::Defeat);
                    }
                }
            }
        } else {
            if player.hardcore {
                player.status.add_insanity(FLEE_FAIL_INSANITY);
            }
            if !self.enemy.loses_turn() {
                let mut counter = EnemyStrikeReport::default();
                self.enemy_strike(
                    player,
                    ctx,
                    rng,
                    FLEE_FAIL_DAMAGE_MULT,
                    FLEE_FAIL_STATUS_MULT,
                    &mut counter,
                );
                counter.outcome = self.outcome();
                report.counter = Some(counter);
            }
            self.round += 1;
        }

        report.outcome = self.outcome();
        Ok(report)
    }

    /// One enemy swing. Shared by the regular enemy turn and the free
    /// attack after a failed flee.
    fn enemy_strike(
        &mut self,
        player: &mut PlayerState,
        ctx: &CombatContext,
        rng: &mut StdRng,
        damage_mult: f64,
        status_mult: f64,
        report: &mut EnemyStrikeReport,
    ) {
        let reach = player
            .inventory
            .equipped_weapon()
            .is_some_and(|w| w.template.reach);
        let chance = formula::enemy_hit_chance(&self.enemy, player, ctx.weather, ctx.phase, reach);
        report.chance = chance;
        report.hit = rng.random::<f64>() < chance;
        if !report.hit {
            return;
        }

        let mut damage = f64::from(self.enemy.damage) * damage_mult;
        if matches!(self.enemy.kind, EnemyKind::Creature { .. }) {
            damage *= ctx.phase.creature_damage_multiplier();
        }
        if self.enemy.has_affliction(AfflictionKind::Acid)
            || self.enemy.has_affliction(AfflictionKind::Burn)
        {
            damage *= WEAKENED_ATTACK_MULT;
        }
        report.damage = damage.round() as u32;
        player.health.deplete(report.damage);

        if player.is_dead() {
            self.state = TurnState::Resolved(Outcome::Defeat);
            return;
        }

        if player.hardcore {
            let creature = matches!(self.enemy.kind, EnemyKind::Creature { .. });
            if creature
                && !player.status.infected
                && rng.random::<f64>() < HIT_INFECTION_CHANCE * status_mult
            {
                player.status.infected = true;
                report.inflicted_infection = true;
            }
            if !player.status.bleeding && rng.random::<f64>() < HIT_BLEED_CHANCE * status_mult {
                player.status.bleeding = true;
                report.inflicted_bleeding = true;
            }
        }
    }
}

/// Spend one round of ammunition, auto-reloading from the pack first.
///
/// Failing to find any ammunition is a refusal: the turn is not consumed
/// and no state changes.
fn spend_ammo(
    player: &mut PlayerState,
    rng: &mut StdRng,
    report: &mut AttackReport,
) -> EngineResult<()> {
    let Some(weapon) = player.inventory.equipped_weapon() else {
        return Ok(());
    };
    let needs_reload = weapon.ammo_loaded == 0;
    let ammo_id = weapon.template.ammo_id.clone();
    let capacity = weapon.template.ammo_capacity;
    let name = weapon.name().to_string();

    if needs_reload {
        if let Some(id) = &ammo_id {
            let take = player.inventory.count_of(id).min(capacity);
            if take > 0 {
                player.inventory.consume(id, take)?;
                if let Some(w) = player.inventory.equipped_weapon_mut() {
                    w.ammo_loaded = take;
                }
            }
        }
    }

    let loaded = player
        .inventory
        .equipped_weapon()
        .map_or(0, |w| w.ammo_loaded);
    if loaded == 0 {
        return Err(EngineError::OutOfAmmo(name));
    }

    if player.level >= FREE_SHOT_LEVEL && rng.random::<f64>() < FREE_SHOT_CHANCE {
        return Ok(());
    }
    if let Some(w) = player.inventory.equipped_weapon_mut() {
        w.ammo_loaded -= 1;
    }
    report.ammo_spent = 1;
    Ok(())
}
