//! Game session, persistence, crafting, and missions for Duskfall.
//!
//! `GameSession` is the one type frontends talk to: it owns the player
//! state and the catalogs, drives the simulation and combat crates, and
//! handles save slots and the hardcore death log.

pub mod config;
pub mod craft;
pub mod death_log;
pub mod error;
pub mod missions;
pub mod save;
pub mod session;

pub use config::GameConfig;
pub use craft::Recipe;
pub use dusk_engine::{AttackReport, EnemyStrikeReport, FleeMishap, FleeReport};
pub use death_log::DeathRecord;
pub use error::{GameError, GameResult};
pub use save::{SLOT_COUNT, SaveOutcome, SlotInfo};
pub use session::{
    ConsumeReport, ExploreReport, FleeResolution, GameSession, RestReport, TurnReport,
    VictoryReport,
};
