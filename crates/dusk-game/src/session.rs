//! The game session: one run of Duskfall.
//!
//! `GameSession` owns the player state, the content catalogs, the RNG, and
//! the event log, and wires the clock, decay, encounter, combat, and
//! persistence layers together behind the typed command surface the
//! frontend drives. The session never prints; frontends drain the event
//! log and render the returned reports.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dusk_core::{
    Bestiary, Companion, CoreError, Enemy, EnemyKind, ItemCatalog, ItemInstance, ItemKind,
    Location, LocationCatalog, PlayerState,
};
use dusk_engine::combat::{Combat, CombatContext, Outcome};
use dusk_engine::encounter::{self, EncounterContext};
use dusk_engine::{AttackReport, EnemyStrikeReport, FleeReport, loot};
use dusk_sim::clock::ActionCost;
use dusk_sim::event::{EventLog, SimEvent, SimEventKind};
use dusk_sim::{apply_decay_with, clock};

use crate::config::GameConfig;
use crate::craft::{self, Recipe};
use crate::death_log::{self, DeathRecord};
use crate::error::{GameError, GameResult};
use crate::missions;
use crate::save::{self, SaveOutcome, SlotInfo};

/// Sleep restored per rested hour before quality scaling.
pub const SLEEP_RECOVERY_PER_HOUR: f64 = 12.0;
/// Extra stamina restored per rested hour before quality scaling.
pub const REST_STAMINA_RECOVERY: f64 = 4.0;
/// Starting location for new characters.
pub const START_LOCATION: &str = "camp";

/// What an exploration (or travel) turn produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreReport {
    /// Hours that passed.
    pub hours: f64,
    /// Name of anything found, if the loot roll hit.
    pub loot: Option<String>,
    /// Name of whatever attacked, if an encounter triggered.
    pub encounter: Option<String>,
}

/// What a rest produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RestReport {
    /// Hours actually slept.
    pub hours: f64,
    /// The rest was cut short.
    pub interrupted: bool,
    /// Name of whatever interrupted it.
    pub encounter: Option<String>,
}

/// What consuming an item did.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumeReport {
    /// The item used.
    pub item: String,
    /// Health restored.
    pub healed: u32,
    /// Hunger restored.
    pub hunger: u32,
    /// Thirst restored.
    pub thirst: u32,
    /// Conditions cured.
    pub cured: Vec<&'static str>,
}

/// The rewards of a won fight.
#[derive(Debug, Clone, PartialEq)]
pub struct VictoryReport {
    /// Total XP earned (kill plus mission bonuses).
    pub xp: u32,
    /// Levels gained from that XP.
    pub levels_gained: u32,
    /// Loot found on or near the corpse.
    pub loot: Option<String>,
    /// Missions completed by this kill.
    pub missions_completed: Vec<String>,
}

/// One full combat round from the player's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// The player's attack.
    pub attack: AttackReport,
    /// The enemy's reply, when the fight went on.
    pub enemy_turn: Option<EnemyStrikeReport>,
    /// Victory rewards, when the fight ended in one.
    pub victory: Option<VictoryReport>,
    /// The player fell.
    pub defeated: bool,
}

/// A resolved flee attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FleeResolution {
    /// The engine's flee report.
    pub flee: FleeReport,
    /// The counterattack (or a fatal mishap) killed the player.
    pub defeated: bool,
}

/// An interactive run of Duskfall.
pub struct GameSession {
    state: PlayerState,
    items: ItemCatalog,
    locations: LocationCatalog,
    bestiary: Bestiary,
    recipes: Vec<Recipe>,
    rng: StdRng,
    events: EventLog,
    combat: Option<Combat>,
    config: GameConfig,
    active_slot: Option<u32>,
}

impl GameSession {
    /// Start a new run with the default catalogs and a starter kit.
    pub fn new(name: &str, config: GameConfig) -> GameResult<Self> {
        let mut state = PlayerState::new(name, START_LOCATION, config.hardcore);
        state.missions = missions::default_missions();
        let mut session = Self::from_state(state, config);
        for id in ["kitchen_knife", "beans", "water_bottle", "bandage"] {
            let template = session.items.get(id)?.clone();
            session.state.inventory.add(ItemInstance::of(&template))?;
        }
        session.state.inventory.equip(0)?;
        Ok(session)
    }

    /// Resume a run from an existing state.
    pub fn from_state(state: PlayerState, config: GameConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let events = EventLog::new(config.max_events);
        Self {
            state,
            items: ItemCatalog::default_set(),
            locations: LocationCatalog::default_set(),
            bestiary: Bestiary::default_set(),
            recipes: craft::default_recipes(),
            rng,
            events,
            combat: None,
            config,
            active_slot: None,
        }
    }

    /// The player state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// The player state, mutably. Frontends should prefer the typed
    /// commands; this is the escape hatch for tooling and tests.
    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// The item catalog.
    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// The location catalog.
    pub fn locations(&self) -> &LocationCatalog {
        &self.locations
    }

    /// The known crafting recipes.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// The location the player is standing in.
    pub fn current_location(&self) -> GameResult<&Location> {
        Ok(self.locations.get(&self.state.location)?)
    }

    /// Whether a fight is in progress.
    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// The current opponent, if any.
    pub fn combat_enemy(&self) -> Option<&Enemy> {
        self.combat.as_ref().map(|c| c.enemy())
    }

    /// Drain everything the simulation recorded since the last drain.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    fn ensure_alive(&self) -> GameResult<()> {
        if self.state.is_dead() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn ensure_out_of_combat(&self) -> GameResult<()> {
        if self.combat.is_some() {
            Err(GameError::InCombat)
        } else {
            Ok(())
        }
    }

    fn combat_ctx(&self) -> CombatContext {
        CombatContext {
            weather: self.state.weather.current,
            phase: clock::phase(&self.state),
        }
    }

    fn encounter_ctx(&self, location: &Location) -> EncounterContext {
        EncounterContext {
            phase: clock::phase(&self.state),
            weather: self.state.weather.current,
            days: self.state.days_survived,
            boss_unlocked: missions::boss_unlocked_at(&self.state, &location.id),
        }
    }

    /// Advance time by one action category.
    pub fn advance_time(&mut self, cost: ActionCost) -> GameResult<f64> {
        self.ensure_alive()?;
        self.ensure_out_of_combat()?;
        Ok(clock::advance(
            &mut self.state,
            cost,
            &mut self.rng,
            &mut self.events,
        )?)
    }

    /// Apply resource decay for the given hours. Returns whether the
    /// player died of it.
    pub fn apply_decay(&mut self, hours: f64) -> GameResult<bool> {
        self.ensure_alive()?;
        let died = dusk_sim::apply_decay(&mut self.state, hours, &mut self.rng, &mut self.events);
        if died {
            let cause = self.last_death_cause();
            self.death_consequences(&cause)?;
        }
        Ok(died)
    }

    /// Roll for an encounter at the current location.
    pub fn roll_encounter(&mut self) -> GameResult<Option<Enemy>> {
        self.ensure_alive()?;
        self.ensure_out_of_combat()?;
        let location = self.locations.get(&self.state.location)?;
        let ctx = self.encounter_ctx(location);
        Ok(encounter::roll_encounter(
            &mut self.rng,
            &ctx,
            location,
            &self.bestiary,
        ))
    }

    /// Roll for loot at the current location. The caller decides whether
    /// to pocket the result.
    pub fn roll_loot(&mut self) -> GameResult<Option<ItemInstance>> {
        self.ensure_alive()?;
        let location = self.locations.get(&self.state.location)?;
        Ok(loot::roll_loot(&mut self.rng, location, &self.items))
    }

    /// Enter combat against an enemy.
    pub fn start_combat(&mut self, enemy: Enemy) -> GameResult<()> {
        self.ensure_alive()?;
        if self.combat.is_some() {
            return Err(GameError::AlreadyInCombat);
        }
        self.events.emit(
            self.state.hours_elapsed,
            SimEventKind::Note {
                text: format!("{} closes in!", enemy.name),
            },
        );
        self.combat = Some(Combat::new(enemy));
        Ok(())
    }

    /// One exploration turn: time passes, the body burns, and the
    /// location may produce trouble or treasure.
    pub fn explore(&mut self) -> GameResult<ExploreReport> {
        self.ensure_alive()?;
        self.ensure_out_of_combat()?;
        let hours = self.advance_time(ActionCost::Medium)?;
        let mut report = ExploreReport {
            hours,
            loot: None,
            encounter: None,
        };
        if self.apply_decay(hours)? {
            return Ok(report);
        }
        if let Some(enemy) = self.roll_encounter()? {
            report.encounter = Some(enemy.name.clone());
            self.start_combat(enemy)?;
            return Ok(report);
        }
        if let Some(item) = self.roll_loot()? {
            let name = item.name().to_string();
            if self.state.inventory.has_room_for(&item.template) {
                self.state.inventory.add(item)?;
                report.loot = Some(name);
            } else {
                self.events.emit(
                    self.state.hours_elapsed,
                    SimEventKind::Note {
                        text: format!("Found {name}, but the pack is full"),
                    },
                );
                report.loot = Some(format!("{name} (left behind)"));
            }
        }
        Ok(report)
    }

    /// Move to another location. Heavy on the clock, and the destination
    /// greets newcomers its own way.
    pub fn travel(&mut self, location_id: &str) -> GameResult<ExploreReport> {
        self.ensure_alive()?;
        self.ensure_out_of_combat()?;
        self.locations.get(location_id)?;
        let hours = self.advance_time(ActionCost::Heavy)?;
        let mut report = ExploreReport {
            hours,
            loot: None,
            encounter: None,
        };
        if self.apply_decay(hours)? {
            return Ok(report);
        }
        self.state.location = location_id.to_string();
        if let Some(enemy) = self.roll_encounter()? {
            report.encounter = Some(enemy.name.clone());
            self.start_combat(enemy)?;
        }
        Ok(report)
    }

    /// Sleep for the given hours. Rest quality and the odds of sleeping
    /// through the night both follow the location's sleep safety.
    pub fn rest(&mut self, hours: f64) -> GameResult<RestReport> {
        self.ensure_alive()?;
        self.ensure_out_of_combat()?;
        let location = self.locations.get(&self.state.location)?.clone();
        let interrupt_chance =
            (1.0 - location.sleep_safety) * encounter::encounter_chance(&location);
        let interrupted = self.rng.random::<f64>() < interrupt_chance;
        let planned = if interrupted { (hours / 2.0).max(0.5) } else { hours };

        let slept = clock::advance(
            &mut self.state,
            ActionCost::Rest(planned),
            &mut self.rng,
            &mut self.events,
        )?;
        let died = apply_decay_with(&mut self.state, slept, true, &mut self.rng, &mut self.events);
        if died {
            let cause = self.last_death_cause();
            self.death_consequences(&cause)?;
            return Ok(RestReport {
                hours: slept,
                interrupted,
                encounter: None,
            });
        }

        let quality = 0.5 + 0.5 * location.sleep_safety;
        self.state
            .sleep
            .restore((slept * SLEEP_RECOVERY_PER_HOUR * quality).round() as u32);
        self.state
            .stamina
            .restore((slept * REST_STAMINA_RECOVERY * quality).round() as u32);

        let mut report = RestReport {
            hours: slept,
            interrupted,
            encounter: None,
        };
        if interrupted {
            let ctx = self.encounter_ctx(&location);
            if let Some(enemy) =
                encounter::spawn_encounter(&mut self.rng, &ctx, &location, &self.bestiary)
            {
                report.encounter = Some(enemy.name.clone());
                self.start_combat(enemy)?;
            }
        }
        Ok(report)
    }

    /// Eat, drink, or apply the item in the given inventory slot.
    pub fn consume(&mut self, index: usize) -> GameResult<ConsumeReport> {
        self.ensure_alive()?;
        let item = self
            .state
            .inventory
            .get(index)
            .ok_or(CoreError::InvalidItemIndex(index))?;
        if !matches!(item.template.kind, ItemKind::Food | ItemKind::Medical) {
            return Err(GameError::NotConsumable(item.name().to_string()));
        }
        let template = item.template.clone();

        let mut report = ConsumeReport {
            item: template.name.clone(),
            healed: template.heal,
            hunger: template.hunger_restore,
            thirst: template.thirst_restore,
            cured: Vec::new(),
        };
        self.state.health.restore(template.heal);
        self.state.hunger.restore(template.hunger_restore);
        self.state.thirst.restore(template.thirst_restore);
        if template.cures_bleeding && self.state.status.bleeding {
            self.state.status.bleeding = false;
            report.cured.push("bleeding");
            self.events.emit(
                self.state.hours_elapsed,
                SimEventKind::StatusCleared { status: "bleeding" },
            );
        }
        if template.cures_infection && self.state.status.infected {
            self.state.status.infected = false;
            report.cured.push("infected");
            self.events.emit(
                self.state.hours_elapsed,
                SimEventKind::StatusCleared { status: "infected" },
            );
        }
        if template.cures_broken_limb && self.state.status.broken_limb {
            self.state.status.broken_limb = false;
            report.cured.push("broken limb");
            self.events.emit(
                self.state.hours_elapsed,
                SimEventKind::StatusCleared {
                    status: "broken limb",
                },
            );
        }

        if let Some(item) = self.state.inventory.get_mut(index) {
            item.count = item.count.saturating_sub(1);
            if item.count == 0 {
                self.state.inventory.remove(index)?;
            }
        }
        Ok(report)
    }

    /// Equip the weapon in the given inventory slot.
    pub fn equip(&mut self, index: usize) -> GameResult<()> {
        self.ensure_alive()?;
        Ok(self.state.inventory.equip(index)?)
    }

    /// Put the current weapon away.
    pub fn unequip(&mut self) {
        self.state.inventory.unequip();
    }

    /// Craft a recipe.
    pub fn craft(&mut self, recipe_id: &str) -> GameResult<String> {
        self.ensure_alive()?;
        self.ensure_out_of_combat()?;
        let slot = craft::craft(&mut self.state, &self.items, &self.recipes, recipe_id)?;
        Ok(self
            .state
            .inventory
            .get(slot)
            .map(|i| i.name().to_string())
            .unwrap_or_default())
    }

    /// Recruit a companion.
    pub fn recruit(&mut self, companion: Companion) -> GameResult<()> {
        self.ensure_alive()?;
        Ok(self.state.recruit(companion)?)
    }

    /// Dismiss a companion by name. Returns whether one left.
    pub fn dismiss(&mut self, name: &str) -> bool {
        self.state.dismiss(name)
    }

    /// Resolve one combat round: the player's attack and, if the fight
    /// goes on, the enemy's reply.
    pub fn resolve_player_attack(&mut self) -> GameResult<TurnReport> {
        self.ensure_alive()?;
        let ctx = self.combat_ctx();
        let combat = self.combat.as_mut().ok_or(GameError::NotInCombat)?;
        let attack = combat.player_attack(&mut self.state, &ctx, &mut self.rng)?;
        let mut report = TurnReport {
            attack,
            enemy_turn: None,
            victory: None,
            defeated: false,
        };
        if let Some(combat) = self.combat.as_mut() {
            if !combat.is_resolved() {
                report.enemy_turn =
                    Some(combat.enemy_turn(&mut self.state, &ctx, &mut self.rng)?);
            }
        }
        let (victory, defeated) = self.settle_combat()?;
        report.victory = victory;
        report.defeated = defeated;
        Ok(report)
    }

    /// Resolve a flee attempt.
    pub fn resolve_flee_attempt(&mut self) -> GameResult<FleeResolution> {
        self.ensure_alive()?;
        let ctx = self.combat_ctx();
        let combat = self.combat.as_mut().ok_or(GameError::NotInCombat)?;
        let flee = combat.attempt_flee(&mut self.state, &ctx, &mut self.rng)?;
        let (_, defeated) = self.settle_combat()?;
        Ok(FleeResolution { flee, defeated })
    }

    /// Apply a terminal combat outcome and drop the combat value.
    fn settle_combat(&mut self) -> GameResult<(Option<VictoryReport>, bool)> {
        let outcome = match &self.combat {
            Some(combat) => combat.outcome(),
            None => None,
        };
        let Some(outcome) = outcome else {
            return Ok((None, false));
        };
        let Some(combat) = self.combat.take() else {
            return Ok((None, false));
        };
        let enemy = combat.into_enemy();
        match outcome {
            Outcome::Victory { xp } => Ok((Some(self.finish_victory(enemy, xp)?), false)),
            Outcome::Defeat => {
                let cause = enemy.name.clone();
                self.events.emit(
                    self.state.hours_elapsed,
                    SimEventKind::PlayerDied {
                        cause: cause.clone(),
                    },
                );
                self.death_consequences(&cause)?;
                Ok((None, true))
            }
            Outcome::Escaped => {
                self.events.emit(
                    self.state.hours_elapsed,
                    SimEventKind::Note {
                        text: format!("You break away from the {}", enemy.name),
                    },
                );
                Ok((None, false))
            }
        }
    }

    /// Kill bookkeeping: XP, missions, level-ups, and corpse loot.
    fn finish_victory(&mut self, enemy: Enemy, xp: u32) -> GameResult<VictoryReport> {
        self.state.kills += 1;
        if enemy.boss && !self.state.bosses_slain.contains(&self.state.location) {
            self.state.bosses_slain.push(self.state.location.clone());
        }

        let mut total_xp = xp;
        let mut completed = Vec::new();
        if let EnemyKind::Creature { species } = enemy.kind {
            let (bonus, done) = missions::record_kill(&mut self.state, species);
            total_xp += bonus;
            for name in &done {
                self.events.emit(
                    self.state.hours_elapsed,
                    SimEventKind::Note {
                        text: format!("Mission complete: {name}"),
                    },
                );
            }
            completed = done;
        }

        let levels_gained = self.state.gain_xp(total_xp);
        for offset in 0..levels_gained {
            self.events.emit(
                self.state.hours_elapsed,
                SimEventKind::LevelUp {
                    level: self.state.level - levels_gained + offset + 1,
                },
            );
        }

        let location = self.locations.get(&self.state.location)?.clone();
        let drop = loot::roll_loot(&mut self.rng, &location, &self.items);
        let loot_name = drop.as_ref().map(|i| i.name().to_string());
        if let Some(item) = drop {
            if self.state.inventory.has_room_for(&item.template) {
                self.state.inventory.add(item)?;
            }
        }

        Ok(VictoryReport {
            xp: total_xp,
            levels_gained,
            loot: loot_name,
            missions_completed: completed,
        })
    }

    fn last_death_cause(&self) -> String {
        self.events
            .events()
            .iter()
            .rev()
            .find_map(|e| match &e.kind {
                SimEventKind::PlayerDied { cause } => Some(cause.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "exposure".to_string())
    }

    /// Hardcore permadeath: record the death forever and burn the save.
    fn death_consequences(&mut self, cause: &str) -> GameResult<()> {
        if !self.state.hardcore {
            return Ok(());
        }
        death_log::append(
            &self.config.save_dir,
            &DeathRecord::from_state(&self.state, cause),
        )?;
        if let Some(slot) = self.active_slot {
            save::delete(&self.config.save_dir, slot)?;
        }
        Ok(())
    }

    /// Save into a slot. Occupied slots ask for confirmation first.
    pub fn save(&mut self, slot: u32) -> GameResult<SaveOutcome> {
        self.ensure_out_of_combat()?;
        let outcome = save::save(&self.config.save_dir, slot, &self.state, false)?;
        if outcome == SaveOutcome::Saved {
            self.active_slot = Some(slot);
        }
        Ok(outcome)
    }

    /// Save into a slot, overwriting whatever is there.
    pub fn save_confirmed(&mut self, slot: u32) -> GameResult<SaveOutcome> {
        self.ensure_out_of_combat()?;
        let outcome = save::save(&self.config.save_dir, slot, &self.state, true)?;
        self.active_slot = Some(slot);
        Ok(outcome)
    }

    /// Load a slot, replacing the current run. On any failure the current
    /// state is left untouched.
    pub fn load(&mut self, slot: u32) -> GameResult<()> {
        let state = save::load(&self.config.save_dir, slot)?;
        self.state = state;
        self.combat = None;
        self.active_slot = Some(slot);
        Ok(())
    }

    /// List the occupied save slots.
    pub fn list_slots(&self) -> GameResult<Vec<SlotInfo>> {
        save::list_slots(&self.config.save_dir)
    }

    /// Read the death log.
    pub fn graveyard(&self) -> GameResult<Vec<DeathRecord>> {
        death_log::read_all(&self.config.save_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_core::{CreatureType, DamageType, ItemTemplate, Stat};
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> GameConfig {
        GameConfig::default()
            .with_save_dir(dir.path())
            .with_seed(7)
    }

    fn session(dir: &TempDir) -> GameSession {
        GameSession::new("Ash", config(dir)).unwrap()
    }

    fn walker(health: u32) -> Enemy {
        Enemy::new(
            EnemyKind::Creature {
                species: CreatureType::Walker,
            },
            "Walker",
            health,
            8,
            1,
        )
    }

    fn arm_with(session: &mut GameSession, template: &ItemTemplate) {
        let slot = session
            .state_mut()
            .inventory
            .add(ItemInstance::of(template))
            .unwrap();
        session.state_mut().inventory.equip(slot).unwrap();
    }

    #[test]
    fn new_run_starts_equipped_at_camp() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        assert_eq!(s.state().location, START_LOCATION);
        assert_eq!(s.state().inventory.equipped_weapon().unwrap().id(), "kitchen_knife");
        assert!(!s.state().missions.is_empty());
        assert!(!s.in_combat());
    }

    #[test]
    fn explore_advances_the_clock_and_burns_resources() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let report = s.explore().unwrap();
        assert!(report.hours > 0.0);
        assert!(s.state().hours_elapsed > 0.0);
        assert!(s.state().hunger.value() < s.state().hunger.max());
    }

    #[test]
    fn fighting_through_a_walker_pays_xp_and_counts_the_kill() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        arm_with(
            &mut s,
            &ItemTemplate::weapon("sledge", "Sledgehammer", 50, DamageType::Blunt),
        );
        s.start_combat(walker(30)).unwrap();
        let mut rounds = 0;
        let victory = loop {
            let report = s.resolve_player_attack().unwrap();
            assert!(!report.defeated, "a walker overcame a fresh survivor");
            if let Some(v) = report.victory {
                break v;
            }
            rounds += 1;
            assert!(rounds < 100, "combat failed to converge");
        };
        assert!(victory.xp > 0);
        assert_eq!(s.state().kills, 1);
        assert!(!s.in_combat());
        assert!(s.state().experience > 0 || s.state().level > 1);
        // Mission progress ticked for the walker cull.
        assert_eq!(s.state().missions[0].progress, 1);
    }

    #[test]
    fn combat_actions_require_a_fight() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(matches!(
            s.resolve_player_attack(),
            Err(GameError::NotInCombat)
        ));
        assert!(matches!(
            s.resolve_flee_attempt(),
            Err(GameError::NotInCombat)
        ));
    }

    #[test]
    fn no_second_fight_and_no_exploring_mid_fight() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.start_combat(walker(1000)).unwrap();
        assert!(matches!(
            s.start_combat(walker(10)),
            Err(GameError::AlreadyInCombat)
        ));
        assert!(matches!(s.explore(), Err(GameError::InCombat)));
        assert!(matches!(s.save(1), Err(GameError::InCombat)));
        assert!(matches!(
            s.advance_time(ActionCost::Light),
            Err(GameError::InCombat)
        ));
    }

    #[test]
    fn hardcore_defeat_burns_the_save_and_fills_the_graveyard() {
        let dir = TempDir::new().unwrap();
        let mut s =
            GameSession::new("Ash", config(&dir).with_hardcore(true)).unwrap();
        assert_eq!(s.save(1).unwrap(), SaveOutcome::Saved);
        assert_eq!(s.list_slots().unwrap().len(), 1);

        s.state_mut().health = Stat::new(1, 80);
        s.start_combat(walker(100_000)).unwrap();
        let mut defeated = false;
        for _ in 0..200 {
            match s.resolve_player_attack() {
                Ok(report) => {
                    if report.defeated {
                        defeated = true;
                        break;
                    }
                }
                Err(GameError::GameOver) => {
                    defeated = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(defeated, "an un-killable walker never landed a hit");
        assert!(s.state().is_dead());
        // Permadeath: slot gone, grave dug.
        assert!(s.list_slots().unwrap().is_empty());
        let graves = s.graveyard().unwrap();
        assert_eq!(graves.len(), 1);
        assert_eq!(graves[0].name, "Ash");
        assert_eq!(graves[0].cause, "Walker");
        // The run is over.
        assert!(matches!(s.explore(), Err(GameError::GameOver)));
    }

    #[test]
    fn standard_defeat_keeps_the_save() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.save(2).unwrap();
        s.state_mut().health = Stat::new(1, 100);
        s.start_combat(walker(100_000)).unwrap();
        for _ in 0..200 {
            match s.resolve_player_attack() {
                Ok(report) if report.defeated => break,
                Ok(_) => {}
                Err(_) => break,
            }
        }
        assert!(s.state().is_dead());
        assert_eq!(s.list_slots().unwrap().len(), 1);
        assert!(s.graveyard().unwrap().is_empty());
    }

    #[test]
    fn session_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.state_mut().hours_elapsed = 30.5;
        s.state_mut().days_survived = 1;
        s.state_mut().kills = 2;
        s.state_mut().status.insanity = 15;
        let before = s.state().clone();
        match s.save(3).unwrap() {
            SaveOutcome::Saved => {}
            SaveOutcome::NeedsConfirmation => panic!("slot 3 should be free"),
        }
        let mut other = session(&dir);
        other.load(3).unwrap();
        assert_eq!(*other.state(), before);
    }

    #[test]
    fn failed_load_leaves_the_run_untouched() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let before = s.state().clone();
        assert!(matches!(s.load(4), Err(GameError::EmptySlot(4))));
        std::fs::write(dir.path().join("slot_4.json"), "{broken").unwrap();
        assert!(matches!(s.load(4), Err(GameError::CorruptSave { .. })));
        assert_eq!(*s.state(), before);
    }

    #[test]
    fn occupied_slot_asks_before_overwriting() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert_eq!(s.save(1).unwrap(), SaveOutcome::Saved);
        let mut other = GameSession::new("Rook", config(&dir)).unwrap();
        assert_eq!(other.save(1).unwrap(), SaveOutcome::NeedsConfirmation);
        assert_eq!(other.save_confirmed(1).unwrap(), SaveOutcome::Saved);
        let slots = other.list_slots().unwrap();
        assert_eq!(slots[0].name, "Rook");
    }

    #[test]
    fn rest_restores_sleep_and_sheds_exhaustion() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.state_mut().sleep.deplete(60);
        s.state_mut().status.exhaustion = 50;
        let report = s.rest(8.0).unwrap();
        assert!(report.hours > 0.0);
        assert!(s.state().sleep.value() > 40);
        assert!(s.state().status.exhaustion < 50);
    }

    #[test]
    fn consuming_food_restores_and_depletes_the_stack() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.state_mut().hunger.deplete(50);
        let index = s
            .state()
            .inventory
            .iter()
            .position(|i| i.id() == "beans")
            .unwrap();
        let report = s.consume(index).unwrap();
        assert_eq!(report.hunger, 30);
        assert_eq!(s.state().hunger.value(), 80);
        assert_eq!(s.state().inventory.count_of("beans"), 0);
    }

    #[test]
    fn weapons_are_not_edible() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(matches!(s.consume(0), Err(GameError::NotConsumable(_))));
    }

    #[test]
    fn bandage_stops_bleeding() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.state_mut().status.bleeding = true;
        let index = s
            .state()
            .inventory
            .iter()
            .position(|i| i.id() == "bandage")
            .unwrap();
        let report = s.consume(index).unwrap();
        assert_eq!(report.cured, vec!["bleeding"]);
        assert!(!s.state().status.bleeding);
    }

    #[test]
    fn crafting_through_the_session() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let mut cloth = ItemInstance::of(&ItemTemplate::material("cloth", "Cloth Strips"));
        cloth.count = 2;
        s.state_mut().inventory.add(cloth).unwrap();
        let name = s.craft("bandage").unwrap();
        assert_eq!(name, "Bandage");
        assert_eq!(s.state().inventory.count_of("cloth"), 0);
    }

    #[test]
    fn travel_validates_and_moves() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(s.travel("atlantis").is_err());
        assert_eq!(s.state().location, START_LOCATION);
        let report = s.travel("suburbs").unwrap();
        assert!(report.hours >= 2.0);
        assert_eq!(s.state().location, "suburbs");
    }

    #[test]
    fn events_accumulate_and_drain() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.start_combat(walker(1000)).unwrap();
        assert!(!s.take_events().is_empty());
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn bounded_stats_hold_through_a_long_run() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        for _ in 0..60 {
            if s.state().is_dead() {
                break;
            }
            if s.in_combat() {
                let _ = s.resolve_flee_attempt();
                continue;
            }
            let _ = s.explore();
            let state = s.state();
            for stat in [state.health, state.stamina, state.hunger, state.thirst, state.sleep] {
                assert!(stat.value() <= stat.max());
            }
            assert!(state.status.insanity <= 100);
            assert!(state.status.exhaustion <= 100);
        }
    }
}
