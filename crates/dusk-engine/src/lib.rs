//! Encounter generation, loot rolls, and combat resolution for Duskfall.
//!
//! Everything here is a pure function of explicit state plus a
//! caller-seeded `StdRng`; the crate performs no I/O and never prints.
//! Probability constants are public so callers and tests can see exactly
//! what they are rolling against.

pub mod combat;
pub mod companion;
pub mod encounter;
pub mod error;
pub mod loot;

pub use combat::{
    AttackReport, Combat, CombatContext, EnemyStrikeReport, FleeMishap, FleeReport, Outcome,
    TurnState,
};
pub use companion::{AssistOutcome, assist};
pub use encounter::{EncounterContext, encounter_chance, roll_encounter};
pub use error::{EngineError, EngineResult};
pub use loot::roll_loot;
