//! Time, weather, and resource decay for Duskfall.
//!
//! Time only advances when the player acts; every function here mutates an
//! explicit [`dusk_core::PlayerState`] and records what happened in an
//! [`EventLog`] instead of printing. All randomness flows through a
//! caller-supplied `StdRng` so runs are reproducible.

pub mod clock;
pub mod decay;
pub mod error;
pub mod event;
pub mod weather;
pub mod weighted;

pub use clock::{ActionCost, DayPhase, advance, hour_of_day, phase};
pub use decay::{apply_decay, apply_decay_with};
pub use error::{SimError, SimResult};
pub use event::{EventLog, SimEvent, SimEventKind};
pub use weather::{WeatherProfile, profile};
