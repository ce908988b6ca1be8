//! Weather states as persisted data.
//!
//! The transition tables, durations, and gameplay modifiers live in the
//! simulation crate; this module only defines the states themselves so the
//! player aggregate can carry its current weather across saves.

use serde::{Deserialize, Serialize};

/// A weather state.
///
/// `Heat` and `Cold` are seasonal: the transition model only reaches them
/// inside specific day-count windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    /// No modifiers.
    Clear,
    /// Mild visibility penalty.
    Cloudy,
    /// Slows travel, dampens accuracy.
    Rain,
    /// Heavy travel and accuracy penalties.
    Storm,
    /// Severe visibility loss; favors ambushers.
    Fog,
    /// Penalizes ranged accuracy.
    Wind,
    /// Seasonal: accelerates thirst.
    Heat,
    /// Seasonal: accelerates hunger, slows enemies.
    Cold,
}

impl Weather {
    /// All weather states.
    pub fn all() -> &'static [Self] {
        &[
            Self::Clear,
            Self::Cloudy,
            Self::Rain,
            Self::Storm,
            Self::Fog,
            Self::Wind,
            Self::Heat,
            Self::Cold,
        ]
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Cloudy => write!(f, "cloudy"),
            Self::Rain => write!(f, "rain"),
            Self::Storm => write!(f, "storm"),
            Self::Fog => write!(f, "fog"),
            Self::Wind => write!(f, "wind"),
            Self::Heat => write!(f, "heat"),
            Self::Cold => write!(f, "cold"),
        }
    }
}

/// The current weather plus how long it will last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    /// The active weather.
    pub current: Weather,
    /// In-game hours until the next transition roll.
    pub hours_remaining: f64,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            current: Weather::Clear,
            hours_remaining: 8.0,
        }
    }
}
