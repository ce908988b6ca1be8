//! The game clock: action durations, day rollover, and day phases.
//!
//! Time only moves when the player acts. Each action category maps to a
//! sampled duration; weather can stretch the longer categories.

use dusk_core::PlayerState;
use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEventKind};
use crate::weather::{profile, tick_weather};

/// Hour of day when a new run starts.
pub const START_HOUR: f64 = 8.0;

/// How long a category of action takes, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionCost {
    /// Checking the pack, a quick glance around. U[0.1, 0.5].
    Trivial,
    /// Eating, patching up. U[0.5, 1.5].
    Light,
    /// Searching a building. U[1.0, 3.0].
    Medium,
    /// Travel, a major scavenge. U[2.0, 5.0].
    Heavy,
    /// Sleeping for an explicit number of hours.
    Rest(f64),
}

impl ActionCost {
    /// The sampled duration range before weather multipliers.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Trivial => (0.1, 0.5),
            Self::Light => (0.5, 1.5),
            Self::Medium => (1.0, 3.0),
            Self::Heavy => (2.0, 5.0),
            Self::Rest(h) => (*h, *h),
        }
    }

    /// Whether weather stretches this category.
    fn weather_sensitive(&self) -> bool {
        matches!(self, Self::Medium | Self::Heavy)
    }
}

/// The part of the day, derived from hour-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// 08:00-18:00.
    Day,
    /// 05:00-08:00 and 18:00-21:00.
    DawnDusk,
    /// 21:00-05:00.
    Night,
}

impl DayPhase {
    /// The phase covering a given hour of day.
    pub fn of_hour(hour: f64) -> Self {
        let h = hour.rem_euclid(24.0);
        if !(5.0..21.0).contains(&h) {
            Self::Night
        } else if h < 8.0 || h >= 18.0 {
            Self::DawnDusk
        } else {
            Self::Day
        }
    }

    /// Multiplier on creature damage in combat.
    pub fn creature_damage_multiplier(self) -> f64 {
        match self {
            Self::Day => 1.0,
            Self::DawnDusk => 1.1,
            Self::Night => 1.3,
        }
    }

    /// Multiplier on creature speed in combat.
    pub fn creature_speed_multiplier(self) -> f64 {
        match self {
            Self::Day => 1.0,
            Self::DawnDusk => 1.1,
            Self::Night => 1.2,
        }
    }

    /// Multiplier applied uniformly to creature spawn weights.
    pub fn spawn_weight_multiplier(self) -> f64 {
        match self {
            Self::Day => 1.0,
            Self::DawnDusk => 1.25,
            Self::Night => 1.75,
        }
    }

    /// How well the player can see; feeds the accuracy formula.
    pub fn visibility_multiplier(self) -> f64 {
        match self {
            Self::Day => 1.0,
            Self::DawnDusk => 0.8,
            Self::Night => 0.6,
        }
    }
}

impl std::fmt::Display for DayPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::DawnDusk => write!(f, "dawn/dusk"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// Current hour of day for a player state.
pub fn hour_of_day(state: &PlayerState) -> f64 {
    (START_HOUR + state.hours_elapsed).rem_euclid(24.0)
}

/// Current day phase for a player state.
pub fn phase(state: &PlayerState) -> DayPhase {
    DayPhase::of_hour(hour_of_day(state))
}

/// Advance time by one action.
///
/// Samples a duration from the category's range, stretches medium/heavy
/// actions under rain and storms, rolls day boundaries, ticks companion
/// recovery and the weather clock, and returns the hours that passed.
pub fn advance(
    state: &mut PlayerState,
    cost: ActionCost,
    rng: &mut StdRng,
    events: &mut EventLog,
) -> SimResult<f64> {
    let (lo, hi) = cost.range();
    if lo <= 0.0 {
        return Err(SimError::InvalidDuration(lo));
    }
    let mut hours = if (hi - lo).abs() < f64::EPSILON {
        lo
    } else {
        rng.random_range(lo..hi)
    };
    if cost.weather_sensitive() {
        hours *= profile(state.weather.current).action_delay;
    }

    state.hours_elapsed += hours;
    let total_days = (state.hours_elapsed / 24.0).floor() as u32;
    while state.days_survived < total_days {
        state.days_survived += 1;
        events.emit(
            state.hours_elapsed,
            SimEventKind::DaySurvived {
                day: state.days_survived,
            },
        );
    }

    state.recover_companions(hours);
    tick_weather(state, hours, rng, events);
    Ok(hours)
}
