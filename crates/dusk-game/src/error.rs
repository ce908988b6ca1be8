//! Error types for the game session layer.

use dusk_core::CoreError;
use dusk_engine::EngineError;
use dusk_sim::SimError;
use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised by the session and persistence layer.
#[derive(Debug, Error)]
pub enum GameError {
    /// A core data-model refusal.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A simulation error.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// A combat engine error.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An underlying filesystem error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A slot number outside the valid range.
    #[error("no such save slot: {0}")]
    InvalidSlot(u32),

    /// The requested slot holds no save.
    #[error("save slot {0} is empty")]
    EmptySlot(u32),

    /// The slot's file exists but cannot be trusted. The current state is
    /// left untouched.
    #[error("save slot {slot} is corrupt: {reason}")]
    CorruptSave {
        /// The slot that failed to load.
        slot: u32,
        /// Why it was rejected.
        reason: String,
    },

    /// The action needs an active combat.
    #[error("not in combat")]
    NotInCombat,

    /// The action cannot start while a combat is active.
    #[error("already in combat")]
    AlreadyInCombat,

    /// The action is blocked while fighting.
    #[error("cannot do that mid-fight")]
    InCombat,

    /// The character is dead; the run is over.
    #[error("the run is over")]
    GameOver,

    /// An unknown crafting recipe id.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// The item cannot be eaten, drunk, or applied.
    #[error("{0} is not consumable")]
    NotConsumable(String),
}
