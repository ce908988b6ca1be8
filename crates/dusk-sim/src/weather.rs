//! Weather rules: gameplay modifiers, durations, and transitions.
//!
//! Transitions are a small Markov chain conditioned on the previous
//! weather. A storm always decays (mostly into rain) and never chains into
//! another storm. The two seasonal states, heat and cold, are reachable
//! only inside their day-count windows.

use dusk_core::{PlayerState, Weather};
use rand::Rng;
use rand::rngs::StdRng;

use crate::event::{EventLog, SimEventKind};
use crate::weighted::pick_weighted;

/// Gameplay modifiers a weather state applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherProfile {
    /// Multiplier on stamina cost / divisor on regeneration.
    pub stamina_drain: f64,
    /// Multiplier on enemy speed during combat.
    pub enemy_speed: f64,
    /// Multiplier on hunger decay.
    pub hunger_rate: f64,
    /// Multiplier on thirst decay.
    pub thirst_rate: f64,
    /// Multiplier on medium/heavy action durations.
    pub action_delay: f64,
}

/// The modifiers for a weather state.
pub fn profile(weather: Weather) -> WeatherProfile {
    match weather {
        Weather::Clear => WeatherProfile {
            stamina_drain: 1.0,
            enemy_speed: 1.0,
            hunger_rate: 1.0,
            thirst_rate: 1.0,
            action_delay: 1.0,
        },
        Weather::Cloudy => WeatherProfile {
            stamina_drain: 1.0,
            enemy_speed: 1.0,
            hunger_rate: 1.0,
            thirst_rate: 1.0,
            action_delay: 1.0,
        },
        Weather::Rain => WeatherProfile {
            stamina_drain: 1.1,
            enemy_speed: 1.0,
            hunger_rate: 1.0,
            thirst_rate: 0.9,
            action_delay: 1.2,
        },
        Weather::Storm => WeatherProfile {
            stamina_drain: 1.4,
            enemy_speed: 0.9,
            hunger_rate: 1.0,
            thirst_rate: 0.9,
            action_delay: 1.5,
        },
        Weather::Fog => WeatherProfile {
            stamina_drain: 1.0,
            enemy_speed: 1.0,
            hunger_rate: 1.0,
            thirst_rate: 1.0,
            action_delay: 1.0,
        },
        Weather::Wind => WeatherProfile {
            stamina_drain: 1.15,
            enemy_speed: 1.0,
            hunger_rate: 1.05,
            thirst_rate: 1.0,
            action_delay: 1.0,
        },
        Weather::Heat => WeatherProfile {
            stamina_drain: 1.25,
            enemy_speed: 1.05,
            hunger_rate: 1.0,
            thirst_rate: 1.5,
            action_delay: 1.0,
        },
        Weather::Cold => WeatherProfile {
            stamina_drain: 1.3,
            enemy_speed: 0.8,
            hunger_rate: 1.4,
            thirst_rate: 1.0,
            action_delay: 1.0,
        },
    }
}

/// Accuracy delta the weather applies to the player's attacks.
///
/// Wind punishes ranged weapons far more than melee; cold helps because
/// enemies slow down.
pub fn accuracy_delta(weather: Weather, ranged: bool) -> f64 {
    match weather {
        Weather::Clear => 0.0,
        Weather::Cloudy => -0.02,
        Weather::Rain => -0.10,
        Weather::Storm => -0.15,
        Weather::Fog => -0.20,
        Weather::Wind => {
            if ranged {
                -0.15
            } else {
                -0.05
            }
        }
        Weather::Heat => -0.07,
        Weather::Cold => 0.05,
    }
}

/// Accuracy delta the weather applies to enemy attacks.
///
/// Signs invert where that makes sense: fog hides an ambusher as well as
/// it blinds the player.
pub fn enemy_accuracy_delta(weather: Weather) -> f64 {
    match weather {
        Weather::Clear | Weather::Cloudy => 0.0,
        Weather::Rain => -0.05,
        Weather::Storm => -0.05,
        Weather::Fog => 0.10,
        Weather::Wind => -0.03,
        Weather::Heat => 0.02,
        Weather::Cold => -0.05,
    }
}

/// Accuracy delta the weather applies to a flee attempt. Fog gives cover;
/// a storm makes running treacherous.
pub fn flee_delta(weather: Weather) -> f64 {
    match weather {
        Weather::Fog => 0.10,
        Weather::Storm => -0.05,
        Weather::Rain => -0.03,
        Weather::Cold => 0.05,
        _ => 0.0,
    }
}

/// How long a weather state lasts, in hours.
pub fn duration_range(weather: Weather) -> (f64, f64) {
    match weather {
        Weather::Clear => (6.0, 16.0),
        Weather::Cloudy => (4.0, 12.0),
        Weather::Rain => (3.0, 10.0),
        Weather::Storm => (2.0, 6.0),
        Weather::Fog => (2.0, 8.0),
        Weather::Wind => (3.0, 10.0),
        Weather::Heat => (8.0, 20.0),
        Weather::Cold => (8.0, 20.0),
    }
}

/// Whether heat can occur on the given survival day.
pub fn heat_window(days: u32) -> bool {
    (20..40).contains(&(days % 90))
}

/// Whether cold can occur on the given survival day.
pub fn cold_window(days: u32) -> bool {
    (65..85).contains(&(days % 90))
}

/// Transition weights out of `prev` on survival day `days`.
///
/// The storm row carries no storm entry, so storms never chain. Seasonal
/// states are appended only inside their windows and stripped outside
/// them, so the table can never select an out-of-season state.
pub fn transition_weights(prev: Weather, days: u32) -> Vec<(Weather, f64)> {
    let mut weights: Vec<(Weather, f64)> = match prev {
        Weather::Clear => vec![
            (Weather::Clear, 3.0),
            (Weather::Cloudy, 4.0),
            (Weather::Wind, 2.0),
            (Weather::Fog, 1.0),
            (Weather::Rain, 1.0),
        ],
        Weather::Cloudy => vec![
            (Weather::Rain, 4.0),
            (Weather::Clear, 3.0),
            (Weather::Cloudy, 2.0),
            (Weather::Wind, 1.0),
            (Weather::Fog, 1.0),
            (Weather::Storm, 1.0),
        ],
        Weather::Rain => vec![
            (Weather::Cloudy, 3.0),
            (Weather::Rain, 2.0),
            (Weather::Storm, 2.0),
            (Weather::Clear, 1.0),
            (Weather::Fog, 1.0),
        ],
        Weather::Storm => vec![
            (Weather::Rain, 5.0),
            (Weather::Cloudy, 2.0),
            (Weather::Wind, 1.0),
            (Weather::Fog, 1.0),
        ],
        Weather::Fog => vec![
            (Weather::Cloudy, 3.0),
            (Weather::Clear, 2.0),
            (Weather::Fog, 2.0),
            (Weather::Rain, 1.0),
        ],
        Weather::Wind => vec![
            (Weather::Clear, 3.0),
            (Weather::Cloudy, 3.0),
            (Weather::Wind, 2.0),
            (Weather::Storm, 1.0),
        ],
        Weather::Heat => vec![
            (Weather::Heat, 3.0),
            (Weather::Clear, 4.0),
            (Weather::Wind, 1.0),
        ],
        Weather::Cold => vec![
            (Weather::Cold, 3.0),
            (Weather::Cloudy, 3.0),
            (Weather::Clear, 2.0),
        ],
    };

    if heat_window(days) && prev != Weather::Cold {
        weights.push((Weather::Heat, 1.5));
    }
    if cold_window(days) && prev != Weather::Heat {
        weights.push((Weather::Cold, 1.5));
    }
    weights.retain(|(w, _)| match w {
        Weather::Heat => heat_window(days),
        Weather::Cold => cold_window(days),
        _ => true,
    });
    weights
}

/// Roll the next weather state.
pub fn roll_transition(rng: &mut StdRng, prev: Weather, days: u32) -> Weather {
    let weights = transition_weights(prev, days);
    pick_weighted(rng, &weights).copied().unwrap_or(Weather::Clear)
}

/// Advance the weather clock by `hours`, transitioning when the current
/// state expires.
pub fn tick_weather(state: &mut PlayerState, hours: f64, rng: &mut StdRng, events: &mut EventLog) {
    state.weather.hours_remaining -= hours;
    if state.weather.hours_remaining > 0.0 {
        return;
    }
    let prev = state.weather.current;
    let next = roll_transition(rng, prev, state.days_survived);
    let (lo, hi) = duration_range(next);
    state.weather.current = next;
    state.weather.hours_remaining = rng.random_range(lo..hi);
    if next != prev {
        events.emit(
            state.hours_elapsed,
            SimEventKind::WeatherChanged {
                from: prev,
                to: next,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn storm_never_chains_into_storm() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..300 {
            assert_ne!(roll_transition(&mut rng, Weather::Storm, 0), Weather::Storm);
        }
    }

    #[test]
    fn all_transition_rows_have_positive_total() {
        for w in Weather::all() {
            for days in [0, 25, 70, 89] {
                let weights = transition_weights(*w, days);
                let total: f64 = weights.iter().map(|(_, x)| x).sum();
                assert!(total > 0.0, "{w} on day {days} has no exits");
            }
        }
    }

    #[test]
    fn seasonal_states_respect_windows() {
        let mut rng = StdRng::seed_from_u64(3);
        // Day 0: neither heat nor cold is reachable from anywhere.
        for w in Weather::all() {
            for _ in 0..100 {
                let next = roll_transition(&mut rng, *w, 0);
                assert_ne!(next, Weather::Heat);
                assert_ne!(next, Weather::Cold);
            }
        }
    }

    #[test]
    fn heat_reachable_only_in_window() {
        assert!(heat_window(25));
        assert!(!heat_window(10));
        assert!(!heat_window(45));
        // Window repeats every 90 days.
        assert!(heat_window(90 + 25));
        let weights = transition_weights(Weather::Clear, 25);
        assert!(weights.iter().any(|(w, x)| *w == Weather::Heat && *x > 0.0));
    }

    #[test]
    fn cold_window_bounds() {
        assert!(cold_window(70));
        assert!(!cold_window(60));
        assert!(!cold_window(85));
    }

    #[test]
    fn heat_row_decays_outside_window() {
        // A heat spell that outlives its window must still have exits.
        let weights = transition_weights(Weather::Heat, 45);
        assert!(weights.iter().all(|(w, _)| *w != Weather::Heat));
        let total: f64 = weights.iter().map(|(_, x)| x).sum();
        assert!(total > 0.0);
    }

    #[test]
    fn tick_transitions_on_expiry() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut events = EventLog::new(0);
        let mut state = PlayerState::new("Ash", "camp", false);
        state.weather.current = Weather::Storm;
        state.weather.hours_remaining = 1.0;
        tick_weather(&mut state, 2.0, &mut rng, &mut events);
        assert_ne!(state.weather.current, Weather::Storm);
        assert!(state.weather.hours_remaining > 0.0);
    }

    #[test]
    fn tick_keeps_weather_until_expiry() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut events = EventLog::new(0);
        let mut state = PlayerState::new("Ash", "camp", false);
        state.weather.current = Weather::Rain;
        state.weather.hours_remaining = 10.0;
        tick_weather(&mut state, 2.0, &mut rng, &mut events);
        assert_eq!(state.weather.current, Weather::Rain);
        assert!((state.weather.hours_remaining - 8.0).abs() < 1e-9);
        assert!(events.is_empty());
    }

    #[test]
    fn storm_profile_slows_actions_most() {
        assert!(profile(Weather::Storm).action_delay > profile(Weather::Rain).action_delay);
        assert!((profile(Weather::Clear).action_delay - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wind_hits_ranged_accuracy_harder() {
        assert!(accuracy_delta(Weather::Wind, true) < accuracy_delta(Weather::Wind, false));
        assert!(accuracy_delta(Weather::Cold, false) > 0.0);
        assert!((accuracy_delta(Weather::Clear, true)).abs() < f64::EPSILON);
    }

    #[test]
    fn fog_favors_the_ambusher() {
        assert!(enemy_accuracy_delta(Weather::Fog) > 0.0);
        assert!(flee_delta(Weather::Fog) > 0.0);
    }
}
