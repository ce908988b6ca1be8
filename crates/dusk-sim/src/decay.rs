//! Resource decay and status-effect evolution.
//!
//! `apply_decay` burns hunger/thirst/sleep down as a function of elapsed
//! hours, day phase, weather, and ruleset, regenerates stamina when the
//! body has fuel to do it with, and evolves the long-running status
//! effects. Work proceeds in at-most-one-hour steps so threshold crossings
//! and stochastic effects land at the right granularity.

use dusk_core::{PlayerState, Stat};
use rand::Rng;
use rand::rngs::StdRng;

use crate::clock::{DayPhase, phase};
use crate::event::{EventLog, SimEventKind};
use crate::weather::profile;

/// Hunger lost per hour before modifiers.
pub const HUNGER_RATE: f64 = 1.7;
/// Thirst lost per hour before modifiers.
pub const THIRST_RATE: f64 = 2.2;
/// Sleep lost per hour before modifiers.
pub const SLEEP_RATE: f64 = 1.3;
/// Every decay rate is multiplied by this under hardcore rules.
pub const HARDCORE_RATE_MULT: f64 = 1.25;
/// Sleep need grows faster through the night.
pub const NIGHT_SLEEP_FACTOR: f64 = 1.25;
/// The body burns slightly less food while it is dark and cool.
pub const NIGHT_HUNGER_FACTOR: f64 = 0.9;

/// Stamina regained per hour when fed and hydrated.
pub const STAMINA_REGEN_PER_HOUR: f64 = 6.0;
/// Hunger/thirst ratio both required for stamina regeneration.
pub const REGEN_FLOOR: f64 = 0.2;
/// Regeneration penalty multipliers; they compound.
pub const BROKEN_LIMB_REGEN_MULT: f64 = 0.5;
/// Regeneration multiplier while exhaustion exceeds 50.
pub const EXHAUSTION_REGEN_MULT: f64 = 0.6;
/// Regeneration multiplier while insanity exceeds 50.
pub const INSANITY_REGEN_MULT: f64 = 0.7;

/// Health lost per hour per depleted resource (hunger or thirst).
pub const STARVATION_DAMAGE_PER_HOUR: f64 = 4.0;
/// Starvation damage multiplier under hardcore rules.
pub const HARDCORE_STARVATION_MULT: f64 = 1.5;
/// Insanity gained per starved hour under hardcore rules.
pub const HARDCORE_STARVATION_INSANITY: u32 = 2;

/// Bleeding damage per hour.
pub const BLEED_DAMAGE_PER_HOUR: u32 = 2;
/// Per-hour chance that bleeding stops on its own.
pub const BLEED_RESOLVE_CHANCE: f64 = 0.05;
/// Infection damage per hour.
pub const INFECTION_DAMAGE_PER_HOUR: u32 = 1;
/// Insanity gained per infected hour.
pub const INFECTION_INSANITY_PER_HOUR: u32 = 2;
/// Per-hour chance that an infection clears on its own.
pub const INFECTION_RESOLVE_CHANCE: f64 = 0.02;

/// Exhaustion shed per resting hour.
pub const EXHAUSTION_REST_RECOVERY: u32 = 8;
/// Insanity shed per hour while well fed and hydrated.
pub const INSANITY_RECOVERY_PER_HOUR: u32 = 2;
/// Hunger/thirst ratio both required for insanity recovery.
pub const COMFORT_FLOOR: f64 = 0.6;

/// Insanity above which hallucinations can occur.
pub const HALLUCINATION_THRESHOLD: u32 = 70;
/// Per-hour hallucination chance above the threshold.
pub const HALLUCINATION_CHANCE: f64 = 0.15;

/// Ratio at or under which a resource is reported as critical.
pub const CRITICAL_RATIO: f64 = 0.15;

/// Deplete needs and evolve status effects over `hours` of activity.
/// Returns true if the player died.
pub fn apply_decay(
    state: &mut PlayerState,
    hours: f64,
    rng: &mut StdRng,
    events: &mut EventLog,
) -> bool {
    apply_decay_with(state, hours, false, rng, events)
}

/// [`apply_decay`] with an explicit resting flag. While resting, sleep
/// need is not depleted and exhaustion recovers.
pub fn apply_decay_with(
    state: &mut PlayerState,
    hours: f64,
    resting: bool,
    rng: &mut StdRng,
    events: &mut EventLog,
) -> bool {
    let mut remaining = hours;
    while remaining > 0.0 {
        let step = remaining.min(1.0);
        remaining -= step;
        if tick(state, step, resting, rng, events) {
            return true;
        }
    }
    false
}

/// One decay step of at most an hour. Returns true on death.
fn tick(
    state: &mut PlayerState,
    step: f64,
    resting: bool,
    rng: &mut StdRng,
    events: &mut EventLog,
) -> bool {
    let weather = profile(state.weather.current);
    let night = phase(state) == DayPhase::Night;
    let hardcore_mult = if state.hardcore {
        HARDCORE_RATE_MULT
    } else {
        1.0
    };

    let hunger_factor = if night { NIGHT_HUNGER_FACTOR } else { 1.0 };
    deplete_need(
        &mut state.hunger,
        HUNGER_RATE * step * hunger_factor * weather.hunger_rate * hardcore_mult,
        "hunger",
        state.hours_elapsed,
        events,
    );
    deplete_need(
        &mut state.thirst,
        THIRST_RATE * step * weather.thirst_rate * hardcore_mult,
        "thirst",
        state.hours_elapsed,
        events,
    );
    if !resting {
        let sleep_factor = if night { NIGHT_SLEEP_FACTOR } else { 1.0 };
        deplete_need(
            &mut state.sleep,
            SLEEP_RATE * step * sleep_factor * hardcore_mult,
            "sleep",
            state.hours_elapsed,
            events,
        );
    }

    // Stamina only comes back when the body has something to burn.
    if state.hunger.ratio() > REGEN_FLOOR && state.thirst.ratio() > REGEN_FLOOR {
        let mut regen = STAMINA_REGEN_PER_HOUR * step / weather.stamina_drain;
        if state.status.broken_limb {
            regen *= BROKEN_LIMB_REGEN_MULT;
        }
        if state.status.exhaustion > 50 {
            regen *= EXHAUSTION_REGEN_MULT;
        }
        if state.status.insanity > 50 {
            regen *= INSANITY_REGEN_MULT;
        }
        state.stamina.restore(regen.round() as u32);
    }

    // Starvation and dehydration.
    let mut starved_causes = 0;
    if state.hunger.is_empty() {
        starved_causes += 1;
    }
    if state.thirst.is_empty() {
        starved_causes += 1;
    }
    if starved_causes > 0 {
        let mult = if state.hardcore {
            HARDCORE_STARVATION_MULT
        } else {
            1.0
        };
        let damage = (STARVATION_DAMAGE_PER_HOUR * step * mult).round() as u32;
        let damage = (damage * starved_causes).max(1);
        state.health.deplete(damage);
        events.emit(
            state.hours_elapsed,
            SimEventKind::HealthLost {
                amount: damage,
                cause: "starvation",
            },
        );
        if state.hardcore {
            state
                .status
                .add_insanity(HARDCORE_STARVATION_INSANITY * starved_causes);
        }
        if state.health.is_empty() {
            let cause = if state.thirst.is_empty() {
                "dehydration"
            } else {
                "starvation"
            };
            events.emit(
                state.hours_elapsed,
                SimEventKind::PlayerDied {
                    cause: cause.to_string(),
                },
            );
            return true;
        }
    }

    // Bleeding.
    if state.status.bleeding {
        let damage = (f64::from(BLEED_DAMAGE_PER_HOUR) * step).round() as u32;
        state.health.deplete(damage);
        events.emit(
            state.hours_elapsed,
            SimEventKind::HealthLost {
                amount: damage,
                cause: "bleeding",
            },
        );
        if state.health.is_empty() {
            events.emit(
                state.hours_elapsed,
                SimEventKind::PlayerDied {
                    cause: "bleeding".to_string(),
                },
            );
            return true;
        }
        if rng.random_bool((BLEED_RESOLVE_CHANCE * step).min(1.0)) {
            state.status.bleeding = false;
            events.emit(
                state.hours_elapsed,
                SimEventKind::StatusCleared { status: "bleeding" },
            );
        }
    }

    // Infection.
    if state.status.infected {
        let damage = (f64::from(INFECTION_DAMAGE_PER_HOUR) * step).round() as u32;
        state.health.deplete(damage);
        state
            .status
            .add_insanity((f64::from(INFECTION_INSANITY_PER_HOUR) * step).round() as u32);
        if state.health.is_empty() {
            events.emit(
                state.hours_elapsed,
                SimEventKind::PlayerDied {
                    cause: "infection".to_string(),
                },
            );
            return true;
        }
        if rng.random_bool((INFECTION_RESOLVE_CHANCE * step).min(1.0)) {
            state.status.infected = false;
            events.emit(
                state.hours_elapsed,
                SimEventKind::StatusCleared { status: "infected" },
            );
        }
    }

    // Exhaustion recovers during any rest; insanity only recovers while
    // the body is genuinely comfortable.
    if resting {
        state
            .status
            .reduce_exhaustion((f64::from(EXHAUSTION_REST_RECOVERY) * step).round() as u32);
    }
    if state.hunger.ratio() > COMFORT_FLOOR && state.thirst.ratio() > COMFORT_FLOOR {
        state
            .status
            .reduce_insanity((f64::from(INSANITY_RECOVERY_PER_HOUR) * step).round() as u32);
    }

    if state.status.insanity > HALLUCINATION_THRESHOLD
        && rng.random_bool((HALLUCINATION_CHANCE * step).min(1.0))
    {
        events.emit(state.hours_elapsed, SimEventKind::Hallucination);
    }

    false
}

/// Deplete a need stat, reporting threshold crossings.
fn deplete_need(
    stat: &mut Stat,
    amount: f64,
    need: &'static str,
    at_hours: f64,
    events: &mut EventLog,
) {
    let before = stat.ratio();
    let was_empty = stat.is_empty();
    stat.deplete(amount.round() as u32);
    if before > CRITICAL_RATIO && stat.ratio() <= CRITICAL_RATIO && !stat.is_empty() {
        events.emit(at_hours, SimEventKind::NeedCritical { need });
    }
    if !was_empty && stat.is_empty() {
        events.emit(at_hours, SimEventKind::NeedDepleted { need });
    }
}
