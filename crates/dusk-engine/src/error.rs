//! Error types for the combat and encounter engine.

use dusk_core::CoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the combat state machine.
///
/// Probability-driven outcomes (misses, failed flees, status rolls) are
/// never errors; only misuse of the state machine or genuine resource
/// exhaustion lands here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A player action was attempted outside the player's turn.
    #[error("it is not the player's turn")]
    NotPlayerTurn,

    /// An enemy action was attempted outside the enemy's turn.
    #[error("it is not the enemy's turn")]
    NotEnemyTurn,

    /// The combat has already resolved.
    #[error("combat is already over")]
    CombatOver,

    /// A ranged weapon has no ammunition left, in the magazine or the pack.
    #[error("{0} is out of ammunition")]
    OutOfAmmo(String),

    /// A core data-model refusal.
    #[error(transparent)]
    Core(#[from] CoreError),
}
